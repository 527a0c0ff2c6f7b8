//! Display implementation for SqlValue

use crate::sql_value::SqlValue;
use std::fmt;

/// Display implementation for SqlValue (how values are shown to users)
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Boolean(true) => write!(f, "TRUE"),
            SqlValue::Boolean(false) => write!(f, "FALSE"),
            SqlValue::Integer(i) => write!(f, "{}", i),
            // Malformed UTF-8 is shown with replacement characters
            SqlValue::Varchar(s) => write!(f, "{}", String::from_utf8_lossy(s.as_bytes())),
            // Presto renders varbinary as space-separated hex pairs
            SqlValue::Varbinary(s) => {
                let mut first = true;
                for byte in s.as_bytes() {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02x}", byte)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}
