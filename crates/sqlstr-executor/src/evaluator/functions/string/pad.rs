//! lpad / rpad
//!
//! Padding always builds a new buffer, including the truncation case.

use sqlstr_types::{SqlValue, StringValue};

use super::utf8;
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::{integer_arg, string_arg};
use crate::limits::MAX_PAD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadSide {
    Left,
    Right,
}

/// Pad `input` to `size` characters with repetitions of `pad`.
///
/// If `input` is already at least `size` characters long it is truncated
/// to `size` instead, and `pad` is not consulted.
pub(crate) fn pad(
    input: &StringValue,
    size: i64,
    pad: &StringValue,
    side: PadSide,
    is_ascii: bool,
) -> Result<StringValue, ExecutorError> {
    if size < 0 || size as u64 > MAX_PAD_SIZE as u64 {
        return Err(ExecutorError::PadSizeOutOfRange { size, max: MAX_PAD_SIZE });
    }
    let size = size as usize;

    let input_bytes = input.as_bytes();
    let input_len = utf8::length(input_bytes, is_ascii);
    if size <= input_len {
        let (_, end) = utf8::char_byte_range(input_bytes, is_ascii, 1, size);
        return Ok(StringValue::owned(&input_bytes[..end]));
    }

    let pad_bytes = pad.as_bytes();
    let pad_len = utf8::length(pad_bytes, is_ascii);
    if pad_len == 0 {
        return Err(ExecutorError::EmptyPadString);
    }

    let fill = size - input_len;
    let (_, partial_end) = utf8::char_byte_range(pad_bytes, is_ascii, 1, fill % pad_len);
    let fill_bytes = (fill / pad_len) * pad_bytes.len() + partial_end;

    let mut out = Vec::with_capacity(input_bytes.len() + fill_bytes);
    if side == PadSide::Right {
        out.extend_from_slice(input_bytes);
    }
    for _ in 0..fill / pad_len {
        out.extend_from_slice(pad_bytes);
    }
    out.extend_from_slice(&pad_bytes[..partial_end]);
    if side == PadSide::Left {
        out.extend_from_slice(input_bytes);
    }

    Ok(StringValue::owned(out))
}

#[derive(Debug)]
pub struct PadFunction {
    side: PadSide,
}

impl PadFunction {
    pub fn new(side: PadSide) -> Self {
        PadFunction { side }
    }

    fn eval(&self, args: &[SqlValue], is_ascii: bool) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let size = integer_arg(self.name(), args, 1)?;
        let pad_string = string_arg(self.name(), args, 2)?;
        pad(input, size, pad_string, self.side, is_ascii).map(SqlValue::Varchar)
    }
}

impl ScalarKernel for PadFunction {
    fn name(&self) -> &'static str {
        match self.side {
            PadSide::Left => "lpad",
            PadSide::Right => "rpad",
        }
    }

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::ascii()
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        self.eval(args, false)
    }

    fn call_ascii(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        self.eval(args, true)
    }
}
