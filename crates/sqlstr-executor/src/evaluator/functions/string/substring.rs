//! Substring extraction functions
//!
//! substr, substr on varbinary, and trail. All three only slice their first
//! argument, so every result is a borrowed view of the input buffer.

use sqlstr_types::{SqlValue, StringValue};

use super::utf8;
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::{integer_arg, optional_integer_arg, string_arg};

/// substr(string, start [, length]) - Extract substring
///
/// Positions start at 1. A negative start counts from the end of the string.
/// `start == 0`, a non-positive length, or a start outside the string all
/// yield the empty string rather than an error.
pub(crate) fn substr(
    input: &StringValue,
    start: i64,
    length: i64,
    is_ascii: bool,
) -> Result<StringValue, ExecutorError> {
    if start == 0 || length <= 0 {
        return Ok(input.empty_view());
    }

    let bytes = input.as_bytes();
    let num_chars = utf8::length(bytes, is_ascii) as i64;

    let start = if start < 0 { num_chars + start + 1 } else { start };
    if start <= 0 || start > num_chars {
        return Ok(input.empty_view());
    }

    let length = length.min(num_chars - start + 1);
    let (begin, end) = utf8::char_byte_range(bytes, is_ascii, start as usize, length as usize);
    Ok(input.slice(begin, end)?)
}

/// trail(string, n) - Last n characters
pub(crate) fn trail(input: &StringValue, n: i64, is_ascii: bool) -> Result<StringValue, ExecutorError> {
    if n <= 0 {
        return Ok(input.empty_view());
    }

    let bytes = input.as_bytes();
    let num_chars = utf8::length(bytes, is_ascii) as i64;
    if n >= num_chars {
        return Ok(input.slice(0, bytes.len())?);
    }

    let start = num_chars - n + 1;
    let (begin, end) = utf8::char_byte_range(bytes, is_ascii, start as usize, n as usize);
    Ok(input.slice(begin, end)?)
}

#[derive(Debug, Default)]
pub struct SubstrFunction;

impl ScalarKernel for SubstrFunction {
    fn name(&self) -> &'static str {
        "substr"
    }

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::ascii().aliasing(0)
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        self.eval(args, false)
    }

    fn call_ascii(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        self.eval(args, true)
    }
}

impl SubstrFunction {
    fn eval(&self, args: &[SqlValue], is_ascii: bool) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let start = integer_arg(self.name(), args, 1)?;
        let length = optional_integer_arg(self.name(), args, 2)?.unwrap_or(i64::MAX);
        substr(input, start, length, is_ascii).map(SqlValue::Varchar)
    }
}

/// substr over VARBINARY: same sign and clamp rules, positions are bytes
#[derive(Debug, Default)]
pub struct SubstrVarbinaryFunction;

impl ScalarKernel for SubstrVarbinaryFunction {
    fn name(&self) -> &'static str {
        "substr_varbinary"
    }

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::generic().aliasing(0)
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let start = integer_arg(self.name(), args, 1)?;
        let length = optional_integer_arg(self.name(), args, 2)?.unwrap_or(i64::MAX);
        // Byte positions are exactly the ASCII arithmetic, no decoding
        substr(input, start, length, true).map(SqlValue::Varbinary)
    }
}

#[derive(Debug, Default)]
pub struct TrailFunction;

impl ScalarKernel for TrailFunction {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::ascii().aliasing(0)
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let n = integer_arg(self.name(), args, 1)?;
        trail(input, n, false).map(SqlValue::Varchar)
    }

    fn call_ascii(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let n = integer_arg(self.name(), args, 1)?;
        trail(input, n, true).map(SqlValue::Varchar)
    }
}
