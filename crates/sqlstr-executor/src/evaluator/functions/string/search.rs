//! String search functions
//!
//! strpos/strrpos find the n-th, possibly overlapping, occurrence of a
//! substring and report it as a 1-based character position. starts_with and
//! ends_with compare raw bytes and have no encoding-sensitive path.

use memchr::memmem;
use sqlstr_types::{SqlValue, StringValue};

use super::utf8;
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::{optional_integer_arg, string_arg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    FromStart,
    FromEnd,
}

/// Byte offset of the `instance`-th occurrence of `needle` in `haystack`.
///
/// Occurrences may overlap: after a match the next search resumes one byte
/// past its start (or, scanning backwards, one byte before its end).
fn find_instance(
    haystack: &[u8],
    needle: &[u8],
    instance: usize,
    direction: SearchDirection,
) -> Option<usize> {
    debug_assert!(instance >= 1);
    if needle.is_empty() {
        return Some(0);
    }

    match direction {
        SearchDirection::FromStart => {
            let finder = memmem::Finder::new(needle);
            let mut from = 0;
            let mut found = None;
            for _ in 0..instance {
                let pos = from + finder.find(haystack.get(from..)?)?;
                found = Some(pos);
                from = pos + 1;
            }
            found
        }
        SearchDirection::FromEnd => {
            let finder = memmem::FinderRev::new(needle);
            let mut end = haystack.len();
            let mut found = None;
            for _ in 0..instance {
                let pos = finder.rfind(&haystack[..end])?;
                found = Some(pos);
                end = pos + needle.len() - 1;
            }
            found
        }
    }
}

/// 1-based character position of the `instance`-th occurrence, 0 when absent
pub(crate) fn string_position(
    haystack: &StringValue,
    needle: &StringValue,
    instance: i64,
    direction: SearchDirection,
    is_ascii: bool,
) -> i64 {
    if instance < 1 {
        return 0;
    }
    let bytes = haystack.as_bytes();
    let instance = usize::try_from(instance).unwrap_or(usize::MAX);
    match find_instance(bytes, needle.as_bytes(), instance, direction) {
        Some(byte_index) => utf8::length(&bytes[..byte_index], is_ascii) as i64 + 1,
        None => 0,
    }
}

/// strpos / strrpos
#[derive(Debug)]
pub struct StrPosFunction {
    direction: SearchDirection,
}

impl StrPosFunction {
    pub fn new(direction: SearchDirection) -> Self {
        StrPosFunction { direction }
    }

    fn eval(&self, args: &[SqlValue], is_ascii: bool) -> Result<SqlValue, ExecutorError> {
        let haystack = string_arg(self.name(), args, 0)?;
        let needle = string_arg(self.name(), args, 1)?;
        let instance = optional_integer_arg(self.name(), args, 2)?.unwrap_or(1);
        Ok(SqlValue::Integer(string_position(haystack, needle, instance, self.direction, is_ascii)))
    }
}

impl ScalarKernel for StrPosFunction {
    fn name(&self) -> &'static str {
        match self.direction {
            SearchDirection::FromStart => "strpos",
            SearchDirection::FromEnd => "strrpos",
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

#[derive(Debug, Default)]
pub struct StartsWithFunction;

impl ScalarKernel for StartsWithFunction {
    fn name(&self) -> &'static str {
        "starts_with"
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let x = string_arg(self.name(), args, 0)?;
        let y = string_arg(self.name(), args, 1)?;
        Ok(SqlValue::Boolean(x.as_bytes().starts_with(y.as_bytes())))
    }
}

#[derive(Debug, Default)]
pub struct EndsWithFunction;

impl ScalarKernel for EndsWithFunction {
    fn name(&self) -> &'static str {
        "ends_with"
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let x = string_arg(self.name(), args, 0)?;
        let y = string_arg(self.name(), args, 1)?;
        Ok(SqlValue::Boolean(x.as_bytes().ends_with(y.as_bytes())))
    }
}
