//! SQL values exchanged with the kernels

mod display;

use crate::{DataType, StringValue};

/// A single argument or result value.
///
/// Kernels never see `Null`: the calling loop short-circuits rows with a NULL
/// argument before invoking them.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Varchar(StringValue),
    Varbinary(StringValue),
}

impl SqlValue {
    /// VARCHAR literal backed by a freshly owned buffer
    pub fn varchar(s: &str) -> Self {
        SqlValue::Varchar(StringValue::from(s))
    }

    /// VARBINARY literal backed by a freshly owned buffer
    pub fn varbinary(bytes: &[u8]) -> Self {
        SqlValue::Varbinary(StringValue::from(bytes))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Type of the value, or `None` for an untyped NULL
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            SqlValue::Null => None,
            SqlValue::Boolean(_) => Some(DataType::Boolean),
            SqlValue::Integer(_) => Some(DataType::Integer),
            SqlValue::Varchar(_) => Some(DataType::Varchar),
            SqlValue::Varbinary(_) => Some(DataType::Varbinary),
        }
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> String {
        match self.data_type() {
            Some(data_type) => data_type.to_string(),
            None => "NULL".to_string(),
        }
    }

    /// The string view of a VARCHAR or VARBINARY value
    pub fn as_string_value(&self) -> Option<&StringValue> {
        match self {
            SqlValue::Varchar(s) | SqlValue::Varbinary(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SqlValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}
