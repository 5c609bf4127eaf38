//! Zeroed, fallibly allocated byte blocks.
//!
//! Every direct record and record array is backed by one `Box<[u8]>`
//! from [`zeroed`]. Allocation goes through `try_reserve_exact`, so an
//! exhausted allocator surfaces as [`DirectError::AllocationFailed`]
//! instead of aborting. The box is freed exactly once when its owner drops.

use crate::error::DirectError;

/// Allocate `len` zeroed bytes as a single contiguous block.
pub fn zeroed(len: usize) -> Result<Box<[u8]>, DirectError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| DirectError::AllocationFailed { requested: len })?;
    data.resize(len, 0u8);
    tracing::trace!(bytes = len, "direct block allocated");
    Ok(data.into_boxed_slice())
}

/// Allocate a zeroed block for `count` records of `stride` bytes each.
pub fn zeroed_array(count: usize, stride: usize) -> Result<Box<[u8]>, DirectError> {
    let len = count
        .checked_mul(stride)
        .ok_or(DirectError::SizeOverflow { count, stride })?;
    zeroed(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_zeroed_and_exact() {
        let block = zeroed(37).unwrap();
        assert_eq!(block.len(), 37);
        assert!(block.iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_length_block_is_allowed() {
        assert!(zeroed(0).unwrap().is_empty());
    }

    #[test]
    fn impossible_allocation_is_reported() {
        let err = zeroed(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            DirectError::AllocationFailed {
                requested: usize::MAX
            }
        );
    }

    #[test]
    fn array_size_overflow_is_reported() {
        let err = zeroed_array(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            DirectError::SizeOverflow {
                count: usize::MAX,
                stride: 2
            }
        );
    }

    #[test]
    fn array_block_is_count_times_stride() {
        assert_eq!(zeroed_array(10, 8).unwrap().len(), 80);
    }
}
