use crate::runtime::{
    lua_limits::MAX_TABLE_SIZE,
    redimension::{PowerOfTwoDimension, PrimeDimension, Redimension},
};

/// Which [`Redimension`] a runtime sizes its tables with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DimensionPolicy {
    #[default]
    Primes,
    PowerOfTwo,
}

impl DimensionPolicy {
    pub fn build(self) -> Box<dyn Redimension> {
        match self {
            DimensionPolicy::Primes => Box::new(PrimeDimension),
            DimensionPolicy::PowerOfTwo => Box::new(PowerOfTwoDimension),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuntimeOption {
    pub dimension: DimensionPolicy,
    /// Hard cap on slot count; growing past it fails with `AllocationFailure`
    pub max_table_size: usize,
    /// Run the table invariant checker after every mutation.
    /// Debug builds always check.
    pub check_invariants: bool,
}

impl Default for RuntimeOption {
    fn default() -> Self {
        Self {
            dimension: DimensionPolicy::Primes,
            max_table_size: MAX_TABLE_SIZE,
            check_invariants: false,
        }
    }
}

#[cfg(feature = "serde")]
impl RuntimeOption {
    /// Parse options from JSON; missing fields keep their defaults
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
