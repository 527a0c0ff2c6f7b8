//! sqlstr - Presto-compatible scalar string kernels
//!
//! This is the root crate that re-exports all components.

pub use sqlstr_executor as executor;
pub use sqlstr_types as types;
