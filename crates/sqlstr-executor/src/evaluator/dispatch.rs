//! Kernel capability contract and ASCII/generic dispatch
//!
//! Every kernel has a generic implementation that works on arbitrary (even
//! malformed) UTF-8, and may additionally offer an ASCII implementation that
//! is only valid when all string inputs are pure 7-bit ASCII, so that byte
//! offsets equal character offsets. Both must produce byte-identical results
//! on ASCII input.
//!
//! The choice between them is made once per batch by the caller, from
//! column-level ASCII metadata, never per row inside a kernel.

use sqlstr_types::SqlValue;

use crate::errors::ExecutorError;

/// Which implementation of a kernel a batch runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Inputs are known to be pure ASCII: byte offset == character offset
    Ascii,
    /// Inputs may contain any bytes; characters are decoded code points
    Generic,
}

/// Flags a kernel declares about itself, queried by the batch dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelCapabilities {
    /// The kernel overrides [`ScalarKernel::call_ascii`]
    pub has_ascii_fast_path: bool,
    /// Index of the argument whose buffer a string result may be a view into
    pub reuses_strings_from_arg: Option<usize>,
}

impl KernelCapabilities {
    /// Generic implementation only; results never alias inputs
    pub const fn generic() -> Self {
        KernelCapabilities { has_ascii_fast_path: false, reuses_strings_from_arg: None }
    }

    /// ASCII fast path available; results never alias inputs
    pub const fn ascii() -> Self {
        KernelCapabilities { has_ascii_fast_path: true, reuses_strings_from_arg: None }
    }

    /// Declare that results may be borrowed views into argument `arg`
    pub const fn aliasing(self, arg: usize) -> Self {
        KernelCapabilities { reuses_strings_from_arg: Some(arg), ..self }
    }

    /// Whether a result may be a borrowed view into argument `arg`
    pub fn aliases_input_argument(&self, arg: usize) -> bool {
        self.reuses_strings_from_arg == Some(arg)
    }
}

/// A scalar function implementation invoked once per non-NULL row.
///
/// Implementations are immutable after [`ScalarKernel::initialize`] and are
/// shared across threads without locking.
pub trait ScalarKernel: Send + Sync + std::fmt::Debug {
    /// Catalog name of the function this kernel implements
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::generic()
    }

    /// Binding-time hook, called once before any row.
    ///
    /// `constants` has one entry per argument: `Some(value)` when that
    /// argument is a literal, `None` when it comes from a column.
    fn initialize(&mut self, _constants: &[Option<SqlValue>]) -> Result<(), ExecutorError> {
        Ok(())
    }

    /// Generic implementation, valid for any input
    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError>;

    /// ASCII implementation; only invoked when every string argument is ASCII
    fn call_ascii(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        self.call(args)
    }
}

/// Invoke `kernel` through the implementation selected for `encoding`.
///
/// Kernels without an ASCII fast path always run generic.
pub fn invoke(
    kernel: &dyn ScalarKernel,
    encoding: Encoding,
    args: &[SqlValue],
) -> Result<SqlValue, ExecutorError> {
    match encoding {
        Encoding::Ascii if kernel.capabilities().has_ascii_fast_path => kernel.call_ascii(args),
        _ => kernel.call(args),
    }
}

/// Per-value classification used by scalar (single row) evaluation
pub fn classify_values(args: &[SqlValue]) -> Encoding {
    let all_ascii = args.iter().all(|arg| match arg {
        SqlValue::Varchar(s) => s.is_ascii(),
        _ => true,
    });
    if all_ascii {
        Encoding::Ascii
    } else {
        Encoding::Generic
    }
}
