/// Table errors - 1 byte, `Copy`
/// Every public operation either succeeds or returns one of these with the
/// table left as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// `nil` (or NaN) used as a table key
    UnexpectedKeyType,
    /// Slot array could not be allocated, or the requested size is above
    /// the largest supported dimension
    AllocationFailure,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::UnexpectedKeyType => write!(f, "unexpected type to index table"),
            TableError::AllocationFailure => write!(f, "not enough memory"),
        }
    }
}

impl std::error::Error for TableError {}

pub type TableResult<T> = Result<T, TableError>;
