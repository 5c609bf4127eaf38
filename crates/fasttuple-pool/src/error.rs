//! Pool error types.

use std::error::Error;
use std::fmt;

/// Errors from [`Pool`](crate::Pool) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// No free element and the pool may not grow.
    Exhausted {
        /// Total elements the pool has allocated.
        size: usize,
    },
    /// The pool has been closed.
    Closed,
    /// The allocator could not produce new elements.
    AllocationFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { size } => {
                write!(f, "pool exhausted: all {size} elements are checked out")
            }
            Self::Closed => write!(f, "pool is closed"),
            Self::AllocationFailed { reason } => write!(f, "pool allocation failed: {reason}"),
        }
    }
}

impl Error for PoolError {}
