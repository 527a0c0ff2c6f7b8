//! SQL Data Type definitions

use std::fmt;

/// Argument and result types understood by the kernel catalog.
///
/// Integer covers every Presto integral width the kernels accept; the
/// kernels themselves always work in 64-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Integer,
    /// UTF-8 text (possibly malformed; kernels tolerate bad sequences)
    Varchar,
    /// Opaque bytes
    Varbinary,
}

impl DataType {
    /// Whether values of this type are carried as a [`crate::StringValue`]
    pub fn is_string_like(&self) -> bool {
        matches!(self, DataType::Varchar | DataType::Varbinary)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Integer => write!(f, "BIGINT"),
            DataType::Varchar => write!(f, "VARCHAR"),
            DataType::Varbinary => write!(f, "VARBINARY"),
        }
    }
}
