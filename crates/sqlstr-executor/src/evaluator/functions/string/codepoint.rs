//! chr / codepoint: conversion between a code point and a one-character string

use sqlstr_types::{SqlValue, StringValue};

use super::utf8::{self, Utf8Unit};
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::ScalarKernel;
use crate::evaluator::functions::{integer_arg, string_arg};

/// chr(n) - String holding the single character with code point n
#[derive(Debug, Default)]
pub struct ChrFunction;

impl ScalarKernel for ChrFunction {
    fn name(&self) -> &'static str {
        "chr"
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let n = integer_arg(self.name(), args, 0)?;
        let c = u32::try_from(n)
            .ok()
            .and_then(char::from_u32)
            .ok_or(ExecutorError::InvalidCodePoint(n))?;
        let mut buf = [0u8; 4];
        Ok(SqlValue::Varchar(StringValue::owned(c.encode_utf8(&mut buf).as_bytes())))
    }
}

/// codepoint(s) - Code point of the only character of s
#[derive(Debug, Default)]
pub struct CodePointFunction;

impl ScalarKernel for CodePointFunction {
    fn name(&self) -> &'static str {
        "codepoint"
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let bytes = input.as_bytes();
        let length = utf8::length(bytes, false);
        if length != 1 {
            return Err(ExecutorError::NotSingleCharacter { length });
        }
        match utf8::decode_at(bytes, 0) {
            Utf8Unit::Char { code_point, .. } => Ok(SqlValue::Integer(code_point as i64)),
            Utf8Unit::Invalid { .. } => {
                Err(ExecutorError::InvalidUtf8 { function: self.name().to_string() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chr() {
        assert_eq!(ChrFunction.call(&[SqlValue::Integer(65)]).unwrap(), SqlValue::varchar("A"));
        assert_eq!(ChrFunction.call(&[SqlValue::Integer(0x20AC)]).unwrap(), SqlValue::varchar("€"));
        assert_eq!(ChrFunction.call(&[SqlValue::Integer(0x1F600)]).unwrap(), SqlValue::varchar("😀"));
        let result = ChrFunction.call(&[SqlValue::Integer(0)]).unwrap();
        assert_eq!(result.as_string_value().map(|s| s.as_bytes().to_vec()), Some(vec![0]));
    }

    #[test]
    fn test_chr_rejects_invalid_code_points() {
        for n in [-1, 0xD800, 0xDFFF, 0x110000, i64::MAX] {
            assert_eq!(
                ChrFunction.call(&[SqlValue::Integer(n)]),
                Err(ExecutorError::InvalidCodePoint(n))
            );
        }
    }

    #[test]
    fn test_codepoint() {
        assert_eq!(CodePointFunction.call(&[SqlValue::varchar("A")]).unwrap(), SqlValue::Integer(65));
        assert_eq!(
            CodePointFunction.call(&[SqlValue::varchar("😀")]).unwrap(),
            SqlValue::Integer(0x1F600)
        );
    }

    #[test]
    fn test_codepoint_errors() {
        assert_eq!(
            CodePointFunction.call(&[SqlValue::varchar("ab")]),
            Err(ExecutorError::NotSingleCharacter { length: 2 })
        );
        assert_eq!(
            CodePointFunction.call(&[SqlValue::varchar("")]),
            Err(ExecutorError::NotSingleCharacter { length: 0 })
        );
        let malformed = SqlValue::Varchar(StringValue::from(vec![0xFF]));
        assert!(matches!(
            CodePointFunction.call(&[malformed]),
            Err(ExecutorError::InvalidUtf8 { .. })
        ));
    }
}
