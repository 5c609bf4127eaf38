//! Pool configuration.

/// What [`checkout`](crate::Pool::checkout) does when no element is free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExhaustedPolicy {
    /// Fail with [`PoolError::Exhausted`](crate::PoolError::Exhausted).
    #[default]
    Throw,
    /// Allocate another increment of elements.
    Expand,
}

/// Growth parameters of a [`Pool`](crate::Pool).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Elements allocated per growth step. Default: 0.
    ///
    /// The first checkout always allocates one increment. An increment of
    /// 0 grows by 1 under [`ExhaustedPolicy::Expand`]; under
    /// [`ExhaustedPolicy::Throw`] every checkout then fails.
    pub increment: usize,
    /// Behaviour when the free set is empty. Default: `Throw`.
    pub policy: ExhaustedPolicy,
}

impl PoolConfig {
    /// Default growth increment.
    pub const DEFAULT_INCREMENT: usize = 0;

    /// Config with `increment` and the default policy.
    pub fn with_increment(increment: usize) -> Self {
        Self {
            increment,
            ..Self::default()
        }
    }

    /// Number of elements to allocate when the free set is empty and
    /// `size` elements already exist, or 0 when the pool may not grow.
    pub fn growth(&self, size: usize) -> usize {
        match self.policy {
            ExhaustedPolicy::Expand => self.increment.max(1),
            ExhaustedPolicy::Throw if size == 0 => self.increment,
            ExhaustedPolicy::Throw => 0,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            increment: Self::DEFAULT_INCREMENT,
            policy: ExhaustedPolicy::Throw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throw_grows_only_from_empty() {
        let config = PoolConfig::with_increment(4);
        assert_eq!(config.growth(0), 4);
        assert_eq!(config.growth(4), 0);
    }

    #[test]
    fn expand_grows_every_time() {
        let config = PoolConfig {
            increment: 3,
            policy: ExhaustedPolicy::Expand,
        };
        assert_eq!(config.growth(0), 3);
        assert_eq!(config.growth(9), 3);
    }

    #[test]
    fn zero_increment() {
        let throw = PoolConfig::with_increment(0);
        assert_eq!(throw.growth(0), 0);
        let expand = PoolConfig {
            increment: 0,
            policy: ExhaustedPolicy::Expand,
        };
        assert_eq!(expand.growth(0), 1);
        assert_eq!(expand.growth(7), 1);
    }
}
