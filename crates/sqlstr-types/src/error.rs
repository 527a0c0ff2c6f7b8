// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// A byte range fell outside the buffer it was meant to view
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    RowIndexOutOfBounds { index: usize, len: usize },
    /// A value of the wrong type was pushed into a typed column builder
    TypeMismatch { expected: String, actual: String },
}

impl std::fmt::Display for TypesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypesError::RangeOutOfBounds { start, end, len } => {
                write!(f, "Byte range [{}, {}) out of bounds for buffer of {} bytes", start, end, len)
            }
            TypesError::RowIndexOutOfBounds { index, len } => {
                write!(f, "Row index {} out of bounds for column of {} rows", index, len)
            }
            TypesError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for TypesError {}
