//! Function evaluation: kernels, dispatch, binding and batch execution

pub mod batch;
pub mod dispatch;
pub mod functions;
pub mod registry;

pub use batch::{ColumnArg, ColumnBatch};
pub use dispatch::{Encoding, KernelCapabilities, ScalarKernel};
pub use registry::{BoundFunction, FunctionRegistry, KernelFactory, Signature};
