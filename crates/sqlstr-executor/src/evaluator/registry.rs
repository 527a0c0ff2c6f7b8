//! Function registry and binding
//!
//! Maps a function name and argument types to a kernel factory. Binding
//! instantiates the kernel, runs its one-time `initialize` hook against the
//! literal arguments, and freezes the result into a [`BoundFunction`] that is
//! shared read-only by every evaluating thread.

use std::collections::HashMap;
use std::sync::Arc;

use sqlstr_types::{DataType, SqlValue};

use crate::config::KernelConfig;
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{self, Encoding, KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::register_string_functions;

/// Creates a fresh, uninitialized kernel
pub type KernelFactory = fn() -> Box<dyn ScalarKernel>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub arg_types: Vec<DataType>,
    pub return_type: DataType,
}

#[derive(Debug, Clone)]
struct RegisteredFunction {
    signature: Signature,
    factory: KernelFactory,
}

/// Function catalog keyed by lower-cased name
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Vec<RegisteredFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        FunctionRegistry { functions: HashMap::new() }
    }

    /// Registry holding the full string function catalog
    pub fn with_string_functions() -> Self {
        let mut registry = FunctionRegistry::new();
        register_string_functions(&mut registry);
        registry
    }

    /// Register one overload. A later registration with the same argument
    /// types replaces the earlier one.
    pub fn register(
        &mut self,
        name: &str,
        arg_types: &[DataType],
        return_type: DataType,
        factory: KernelFactory,
    ) {
        let signature = Signature { arg_types: arg_types.to_vec(), return_type };
        let overloads = self.functions.entry(name.to_lowercase()).or_default();
        overloads.retain(|f| f.signature.arg_types != signature.arg_types);
        overloads.push(RegisteredFunction { signature, factory });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    /// Registered overloads of `name`, in registration order
    pub fn signatures(&self, name: &str) -> Vec<Signature> {
        self.functions
            .get(&name.to_lowercase())
            .map(|overloads| overloads.iter().map(|f| f.signature.clone()).collect())
            .unwrap_or_default()
    }

    /// Names of all registered functions, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve an overload and initialize its kernel.
    ///
    /// `constants` carries one entry per argument: `Some(value)` for a
    /// literal, `None` for a column. It may be empty when no argument is a
    /// literal.
    pub fn bind(
        &self,
        name: &str,
        arg_types: &[DataType],
        constants: &[Option<SqlValue>],
    ) -> Result<BoundFunction, ExecutorError> {
        let key = name.to_lowercase();
        let overloads = self
            .functions
            .get(&key)
            .ok_or_else(|| ExecutorError::UnknownFunction(name.to_string()))?;

        let registered = overloads
            .iter()
            .find(|f| f.signature.arg_types == arg_types)
            .ok_or_else(|| ExecutorError::NoMatchingSignature {
                name: key.clone(),
                arg_types: arg_types.to_vec(),
            })?;

        if !constants.is_empty() && constants.len() != arg_types.len() {
            return Err(ExecutorError::ArgumentCountMismatch {
                function: key,
                expected: arg_types.len(),
                actual: constants.len(),
            });
        }

        let mut kernel = (registered.factory)();
        if constants.is_empty() {
            kernel.initialize(&vec![None; arg_types.len()])?;
        } else {
            kernel.initialize(constants)?;
        }

        log::debug!(
            "bound {}({}) -> {} [{:?}]",
            key,
            arg_types.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", "),
            registered.signature.return_type,
            kernel.capabilities()
        );

        Ok(BoundFunction {
            name: key,
            signature: registered.signature.clone(),
            kernel: Arc::from(kernel),
            config: *KernelConfig::global(),
        })
    }
}

/// A resolved, initialized function ready to evaluate rows.
///
/// Immutable; clones share the same kernel.
#[derive(Debug, Clone)]
pub struct BoundFunction {
    pub(crate) name: String,
    pub(crate) signature: Signature,
    pub(crate) kernel: Arc<dyn ScalarKernel>,
    pub(crate) config: KernelConfig,
}

impl BoundFunction {
    /// Replace the process-wide configuration for this function
    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn return_type(&self) -> DataType {
        self.signature.return_type
    }

    pub fn capabilities(&self) -> KernelCapabilities {
        self.kernel.capabilities()
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Check argument count and types, returning whether any argument is NULL
    pub(crate) fn check_row(&self, args: &[SqlValue]) -> Result<bool, ExecutorError> {
        if args.len() != self.signature.arg_types.len() {
            return Err(ExecutorError::ArgumentCountMismatch {
                function: self.name.clone(),
                expected: self.signature.arg_types.len(),
                actual: args.len(),
            });
        }
        let mut has_null = false;
        for (position, (arg, expected)) in args.iter().zip(&self.signature.arg_types).enumerate() {
            match arg.data_type() {
                None => has_null = true,
                Some(actual) if actual == *expected => {}
                Some(_) => {
                    return Err(ExecutorError::TypeMismatch {
                        function: self.name.clone(),
                        position,
                        expected: *expected,
                        actual: arg.type_name(),
                    })
                }
            }
        }
        Ok(has_null)
    }

    /// Run the kernel on one row whose arguments are already checked
    pub(crate) fn invoke(&self, encoding: Encoding, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let encoding = if self.config.ascii_fast_path { encoding } else { Encoding::Generic };
        dispatch::invoke(self.kernel.as_ref(), encoding, args)
    }

    /// Evaluate a single row of scalar values.
    ///
    /// Any NULL argument yields NULL without invoking the kernel. The ASCII
    /// path is chosen from the values themselves.
    pub fn eval_row(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        if self.check_row(args)? {
            return Ok(SqlValue::Null);
        }
        self.invoke(dispatch::classify_values(args), args)
    }
}
