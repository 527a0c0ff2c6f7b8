//! String length functions

use sqlstr_types::SqlValue;

use super::utf8;
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::string_arg;

/// length(varchar) - Number of characters; malformed units count once each
#[derive(Debug, Default)]
pub struct LengthFunction;

impl ScalarKernel for LengthFunction {
    fn name(&self) -> &'static str {
        "length"
    }

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::ascii()
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        Ok(SqlValue::Integer(utf8::length(input.as_bytes(), false) as i64))
    }

    fn call_ascii(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        Ok(SqlValue::Integer(utf8::length(input.as_bytes(), true) as i64))
    }
}

/// length(varbinary) - Number of bytes
#[derive(Debug, Default)]
pub struct LengthVarbinaryFunction;

impl ScalarKernel for LengthVarbinaryFunction {
    fn name(&self) -> &'static str {
        "length_varbinary"
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        Ok(SqlValue::Integer(input.len() as i64))
    }
}
