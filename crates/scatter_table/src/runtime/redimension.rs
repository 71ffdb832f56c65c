use crate::runtime::{TableError, TableResult, lua_limits::DIMENSIONS};

/// Size-dimensioning function used at table creation and on every rehash.
///
/// Implementations must be monotonic non-decreasing and return a value
/// `>= n` (and at least 1).
pub trait Redimension {
    fn redimension(&self, n: usize) -> TableResult<usize>;
}

/// First entry of [`DIMENSIONS`] that is `>= n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeDimension;

impl Redimension for PrimeDimension {
    fn redimension(&self, n: usize) -> TableResult<usize> {
        DIMENSIONS
            .iter()
            .copied()
            .find(|&d| d >= n)
            .ok_or(TableError::AllocationFailure)
    }
}

/// Next power of two `>= n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerOfTwoDimension;

impl Redimension for PowerOfTwoDimension {
    fn redimension(&self, n: usize) -> TableResult<usize> {
        n.max(1)
            .checked_next_power_of_two()
            .ok_or(TableError::AllocationFailure)
    }
}
