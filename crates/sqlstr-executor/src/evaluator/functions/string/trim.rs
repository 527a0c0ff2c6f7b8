//! String trimming functions
//!
//! trim/ltrim/rtrim(string) strip whitespace; trim/ltrim/rtrim(string, chars)
//! strip any byte of an ASCII character set. Results are always a view of
//! the input.

use sqlstr_types::{SqlValue, StringValue};

use super::utf8::{self, Utf8Units};
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::string_arg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimSide {
    Both,
    Leading,
    Trailing,
}

impl TrimSide {
    fn leading(self) -> bool {
        matches!(self, TrimSide::Both | TrimSide::Leading)
    }

    fn trailing(self) -> bool {
        matches!(self, TrimSide::Both | TrimSide::Trailing)
    }
}

/// Java `Character.isWhitespace`; non-breaking spaces are excluded
pub(crate) fn is_unicode_whitespace(code_point: u32) -> bool {
    matches!(
        code_point,
        0x09..=0x0D
            | 0x1C..=0x20
            | 0x1680
            | 0x2000..=0x2006
            | 0x2008..=0x200A
            | 0x2028
            | 0x2029
            | 0x205F
            | 0x3000
    )
}

pub(crate) fn is_ascii_whitespace(byte: u8) -> bool {
    byte < 0x80 && is_unicode_whitespace(byte as u32)
}

/// Byte range left after trimming whitespace, ASCII input
fn ascii_whitespace_bounds(bytes: &[u8], side: TrimSide) -> (usize, usize) {
    trim_bytes_where(bytes, side, is_ascii_whitespace)
}

/// Byte range left after trimming whitespace, any input
fn unicode_whitespace_bounds(bytes: &[u8], side: TrimSide) -> (usize, usize) {
    let is_space = |unit: utf8::Utf8Unit| unit.code_point().is_some_and(is_unicode_whitespace);

    let mut begin = 0;
    if side.leading() {
        let mut units = Utf8Units::new(bytes);
        loop {
            let offset = units.offset();
            match units.next() {
                Some(unit) if is_space(unit) => continue,
                _ => {
                    begin = offset;
                    break;
                }
            }
        }
    }

    let mut end = bytes.len();
    if side.trailing() {
        while end > begin {
            match utf8::decode_last(&bytes[begin..end]) {
                Some((unit, start)) if is_space(unit) => end = begin + start,
                _ => break,
            }
        }
    }

    (begin, end)
}

fn trim_bytes_where(bytes: &[u8], side: TrimSide, strip: impl Fn(u8) -> bool) -> (usize, usize) {
    let mut begin = 0;
    if side.leading() {
        while begin < bytes.len() && strip(bytes[begin]) {
            begin += 1;
        }
    }
    let mut end = bytes.len();
    if side.trailing() {
        while end > begin && strip(bytes[end - 1]) {
            end -= 1;
        }
    }
    (begin, end)
}

/// Trim whitespace from `input`
pub(crate) fn trim_whitespace(
    input: &StringValue,
    side: TrimSide,
    is_ascii: bool,
) -> Result<StringValue, ExecutorError> {
    let (begin, end) = if is_ascii {
        ascii_whitespace_bounds(input.as_bytes(), side)
    } else {
        unicode_whitespace_bounds(input.as_bytes(), side)
    };
    Ok(input.slice(begin, end)?)
}

/// Trim every byte of `chars` from `input`; both must be ASCII
pub(crate) fn trim_chars(
    function: &str,
    input: &StringValue,
    chars: &StringValue,
    side: TrimSide,
) -> Result<StringValue, ExecutorError> {
    if !chars.is_ascii() {
        return Err(ExecutorError::UnsupportedFeature(format!(
            "{} with a non-ASCII character set is not supported",
            function
        )));
    }
    if !input.is_ascii() {
        return Err(ExecutorError::UnsupportedFeature(format!(
            "{} with a character set requires ASCII input",
            function
        )));
    }

    let set = chars.as_bytes();
    let (begin, end) = trim_bytes_where(input.as_bytes(), side, |b| set.contains(&b));
    Ok(input.slice(begin, end)?)
}

/// trim/ltrim/rtrim, with and without a character set argument
#[derive(Debug)]
pub struct TrimFunction {
    side: TrimSide,
}

impl TrimFunction {
    pub fn new(side: TrimSide) -> Self {
        TrimFunction { side }
    }

    pub fn side(&self) -> TrimSide {
        self.side
    }

    fn eval(&self, args: &[SqlValue], is_ascii: bool) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let trimmed = if args.len() > 1 {
            let chars = string_arg(self.name(), args, 1)?;
            trim_chars(self.name(), input, chars, self.side)?
        } else {
            trim_whitespace(input, self.side, is_ascii)?
        };
        Ok(SqlValue::Varchar(trimmed))
    }
}

impl ScalarKernel for TrimFunction {
    fn name(&self) -> &'static str {
        match self.side {
            TrimSide::Both => "trim",
            TrimSide::Leading => "ltrim",
            TrimSide::Trailing => "rtrim",
        }
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
