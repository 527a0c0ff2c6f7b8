//! Executor - Presto-compatible scalar string kernels
//!
//! This crate provides the string function catalog and the machinery that
//! binds and evaluates it over column batches.

pub mod config;
pub mod errors;
pub mod evaluator;
pub mod limits;

pub use config::KernelConfig;
pub use errors::ExecutorError;
pub use evaluator::functions::string::utf8;
pub use evaluator::{
    BoundFunction, ColumnArg, ColumnBatch, Encoding, FunctionRegistry, KernelCapabilities,
    ScalarKernel, Signature,
};
