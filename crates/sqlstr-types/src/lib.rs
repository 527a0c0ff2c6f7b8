//! Value and buffer types for the sqlstr string kernels
//!
//! This crate provides the data model the kernels and the batch evaluator share:
//! - Data type definitions (BOOLEAN, INTEGER, VARCHAR, VARBINARY)
//! - SQL values passed to and returned from kernels
//! - Reference-counted byte buffers and borrowed/owned string views
//! - Minimal columnar vectors carrying per-column ASCII metadata

mod columnar;
mod data_type;
mod error;
mod sql_value;
mod string_value;

pub use columnar::{ColumnVector, ColumnVectorBuilder, StringColumn, StringColumnBuilder};
pub use data_type::DataType;
pub use error::TypesError;
pub use sql_value::SqlValue;
pub use string_value::{ByteRange, StringBuffer, StringValue};
