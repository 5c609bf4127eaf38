//! The pool itself.
//!
//! ```text
//!            checkout (first)              close()
//!   Empty ───────────────────▶ Active ──────────────▶ Closed
//!  size=0     grow(increment)  size=k   destroy free    terminal
//!                               │  ▲
//!                   checkout ───┘  └─── release
//!          (grows again only under Expand)
//! ```
//!
//! All state sits behind one mutex. No operation waits for an element to
//! be released; an exhausted `Throw` pool fails immediately.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{ExhaustedPolicy, PoolConfig};
use crate::error::PoolError;

/// Produces `count` fresh elements for a growing pool.
pub trait Allocator<T>: Send + Sync {
    /// Allocate `count` elements.
    fn allocate(&self, count: usize) -> Result<Vec<T>, PoolError>;
}

impl<T, F> Allocator<T> for F
where
    F: Fn(usize) -> Result<Vec<T>, PoolError> + Send + Sync,
{
    fn allocate(&self, count: usize) -> Result<Vec<T>, PoolError> {
        self(count)
    }
}

/// Releases elements a closing pool no longer needs.
pub trait Destroyer<T>: Send + Sync {
    /// Destroy every element in `items`.
    fn destroy(&self, items: Vec<T>);
}

impl<T, F> Destroyer<T> for F
where
    F: Fn(Vec<T>) + Send + Sync,
{
    fn destroy(&self, items: Vec<T>) {
        self(items)
    }
}

type Initializer<T> = Box<dyn Fn(&mut T) + Send + Sync>;

struct State<T> {
    free: Vec<T>,
    size: usize,
    closed: bool,
}

/// A thread-safe pool of reusable elements.
///
/// Elements leave the pool by value on [`checkout`](Self::checkout) and
/// come back through [`release`](Self::release). Anything still checked
/// out when the pool closes belongs to its holder.
pub struct Pool<T> {
    config: PoolConfig,
    allocator: Box<dyn Allocator<T>>,
    destroyer: Box<dyn Destroyer<T>>,
    initializer: Option<Initializer<T>>,
    state: Mutex<State<T>>,
}

impl<T> Pool<T> {
    /// Start building a pool that grows by `increment`.
    pub fn builder(increment: usize) -> PoolBuilder<T> {
        PoolBuilder {
            config: PoolConfig::with_increment(increment),
            initializer: None,
        }
    }

    /// Create an empty pool. Nothing is allocated until the first checkout.
    pub fn new(
        config: PoolConfig,
        allocator: impl Allocator<T> + 'static,
        destroyer: impl Destroyer<T> + 'static,
    ) -> Self {
        Self {
            config,
            allocator: Box::new(allocator),
            destroyer: Box::new(destroyer),
            initializer: None,
            state: Mutex::new(State {
                free: Vec::new(),
                size: 0,
                closed: false,
            }),
        }
    }

    // A panicking allocator or destroyer never leaves `State` half-updated,
    // so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take a free element, growing the pool if allowed.
    ///
    /// The initializer, if any, runs on the element before it is returned.
    pub fn checkout(&self) -> Result<T, PoolError> {
        let mut item = {
            let mut state = self.lock();
            if state.closed {
                return Err(PoolError::Closed);
            }
            if state.free.is_empty() {
                let count = self.config.growth(state.size);
                if count == 0 {
                    return Err(PoolError::Exhausted { size: state.size });
                }
                let fresh = self.allocator.allocate(count)?;
                if fresh.is_empty() {
                    return Err(PoolError::AllocationFailed {
                        reason: format!("allocator returned no elements for a request of {count}"),
                    });
                }
                let grown = fresh.len();
                state.size += grown;
                state.free.extend(fresh);
                tracing::debug!(grown, requested = count, size = state.size, "pool grown");
            }
            state
                .free
                .pop()
                .ok_or(PoolError::Exhausted { size: state.size })?
        };
        if let Some(init) = &self.initializer {
            init(&mut item);
        }
        Ok(item)
    }

    /// Return an element to the free set.
    ///
    /// After [`close`](Self::close) the element is destroyed instead and
    /// [`PoolError::Closed`] is returned.
    pub fn release(&self, item: T) -> Result<(), PoolError> {
        let mut state = self.lock();
        if state.closed {
            drop(state);
            self.destroyer.destroy(vec![item]);
            return Err(PoolError::Closed);
        }
        state.free.push(item);
        Ok(())
    }

    /// Destroy every free element and refuse further checkouts.
    ///
    /// Idempotent.
    pub fn close(&self) {
        let free = {
            let mut state = self.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            std::mem::take(&mut state.free)
        };
        tracing::debug!(destroyed = free.len(), "pool closed");
        if !free.is_empty() {
            self.destroyer.destroy(free);
        }
    }

    /// Total elements allocated so far, free or checked out.
    pub fn size(&self) -> usize {
        self.lock().size
    }

    /// Elements currently free.
    pub fn available(&self) -> usize {
        self.lock().free.len()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// The pool's growth parameters.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

impl<T> Drop for Pool<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Pool")
            .field("config", &self.config)
            .field("size", &state.size)
            .field("available", &state.free.len())
            .field("closed", &state.closed)
            .finish()
    }
}

/// Builder for [`Pool`].
pub struct PoolBuilder<T> {
    config: PoolConfig,
    initializer: Option<Initializer<T>>,
}

impl<T> PoolBuilder<T> {
    /// Grow on exhaustion instead of failing.
    pub fn expanding(mut self) -> Self {
        self.config.policy = ExhaustedPolicy::Expand;
        self
    }

    /// Set the exhaustion policy explicitly.
    pub fn policy(mut self, policy: ExhaustedPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Run `f` on every element as it is checked out.
    pub fn initializer(mut self, f: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        self.initializer = Some(Box::new(f));
        self
    }

    /// Finish with the element allocator and destroyer.
    pub fn build(
        self,
        allocator: impl Allocator<T> + 'static,
        destroyer: impl Destroyer<T> + 'static,
    ) -> Pool<T> {
        let mut pool = Pool::new(self.config, allocator, destroyer);
        pool.initializer = self.initializer;
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn zeros(count: usize) -> Result<Vec<u64>, PoolError> {
        Ok(vec![0; count])
    }

    #[test]
    fn nothing_is_allocated_before_first_checkout() {
        let pool = Pool::builder(5).build(zeros, |_: Vec<u64>| {});
        assert_eq!(pool.size(), 0);
        assert_eq!(pool.available(), 0);
        pool.checkout().unwrap();
        assert_eq!(pool.size(), 5);
        assert_eq!(pool.available(), 4);
    }

    #[test]
    fn allocation_failure_leaves_pool_unchanged() {
        let pool = Pool::builder(3).build(
            |_: usize| -> Result<Vec<u64>, PoolError> {
                Err(PoolError::AllocationFailed {
                    reason: "out of memory".into(),
                })
            },
            |_: Vec<u64>| {},
        );
        assert!(matches!(
            pool.checkout(),
            Err(PoolError::AllocationFailed { .. })
        ));
        assert_eq!(pool.size(), 0);
        assert!(!pool.is_closed());
    }

    #[test]
    fn close_destroys_only_free_elements() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&destroyed);
        let pool = Pool::builder(4).build(zeros, move |items: Vec<u64>| {
            counter.fetch_add(items.len(), Ordering::SeqCst);
        });
        let held = pool.checkout().unwrap();
        pool.close();
        assert_eq!(destroyed.load(Ordering::SeqCst), 3);

        pool.close();
        assert_eq!(destroyed.load(Ordering::SeqCst), 3);

        assert_eq!(pool.release(held), Err(PoolError::Closed));
        assert_eq!(destroyed.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn drop_closes_the_pool() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&destroyed);
        {
            let pool = Pool::builder(2).build(zeros, move |items: Vec<u64>| {
                counter.fetch_add(items.len(), Ordering::SeqCst);
            });
            pool.checkout().map(|v| pool.release(v)).unwrap().unwrap();
        }
        assert_eq!(destroyed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn debug_reports_counts() {
        let pool = Pool::builder(2).build(zeros, |_: Vec<u64>| {});
        let _held = pool.checkout().unwrap();
        let text = format!("{pool:?}");
        assert!(text.contains("size: 2"), "{text}");
        assert!(text.contains("available: 1"), "{text}");
    }
}
