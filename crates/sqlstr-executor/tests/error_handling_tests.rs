//! Tests for binding-time and per-row errors

mod common;

use common::{bind, eval, int, varchar};
use sqlstr_executor::limits::{MAX_LEVENSHTEIN_COMBINED_INPUT_SIZE, MAX_PAD_SIZE};
use sqlstr_executor::{ColumnArg, ExecutorError, FunctionRegistry};
use sqlstr_types::{ColumnVector, DataType, SqlValue};

// ============================================================================
// Binding errors
// ============================================================================

#[test]
fn test_invalid_normalization_form_fails_at_bind() {
    let err = eval("normalize", &[varchar("abc"), varchar("NFZ")]).unwrap_err();
    assert_eq!(err, ExecutorError::InvalidNormalizationForm("NFZ".to_string()));
    assert!(err.is_binding_error());
}

#[test]
fn test_form_from_column_fails_at_bind() {
    let registry = FunctionRegistry::with_string_functions();
    let err = registry
        .bind("normalize", &[DataType::Varchar, DataType::Varchar], &[None, None])
        .unwrap_err();
    assert!(err.is_binding_error());
}

#[test]
fn test_unknown_function_and_signature() {
    assert_eq!(
        eval("reverse", &[varchar("abc")]),
        Err(ExecutorError::UnknownFunction("reverse".to_string()))
    );
    assert!(matches!(
        eval("lpad", &[varchar("abc"), int(3)]),
        Err(ExecutorError::NoMatchingSignature { .. })
    ));
}

// ============================================================================
// Per-row errors
// ============================================================================

#[test]
fn test_pad_errors() {
    assert_eq!(eval("lpad", &[varchar("ab"), int(5), varchar("")]), Err(ExecutorError::EmptyPadString));
    assert_eq!(
        eval("rpad", &[varchar("ab"), int(-1), varchar("x")]),
        Err(ExecutorError::PadSizeOutOfRange { size: -1, max: MAX_PAD_SIZE })
    );
    assert!(eval("rpad", &[varchar("ab"), int(MAX_PAD_SIZE as i64 + 1), varchar("x")]).is_err());
}

#[test]
fn test_levenshtein_size_limit() {
    let left = "a".repeat(1001);
    let right = "b".repeat(1000);
    assert_eq!(
        eval("levenshtein_distance", &[varchar(&left), varchar(&right)]),
        Err(ExecutorError::LevenshteinInputTooLarge {
            left: 1001,
            right: 1000,
            max: MAX_LEVENSHTEIN_COMBINED_INPUT_SIZE,
        })
    );
}

#[test]
fn test_trim_charset_requires_ascii() {
    assert!(matches!(
        eval("trim", &[varchar("abc"), varchar("é")]),
        Err(ExecutorError::UnsupportedFeature(_))
    ));
    assert!(matches!(
        eval("ltrim", &[varchar("ébc"), varchar("a")]),
        Err(ExecutorError::UnsupportedFeature(_))
    ));
}

#[test]
fn test_code_point_errors() {
    assert_eq!(eval("chr", &[int(0x110000)]), Err(ExecutorError::InvalidCodePoint(0x110000)));
    assert_eq!(eval("chr", &[int(0xD800)]), Err(ExecutorError::InvalidCodePoint(0xD800)));
    assert_eq!(
        eval("codepoint", &[varchar("ab")]),
        Err(ExecutorError::NotSingleCharacter { length: 2 })
    );
}

#[test]
fn test_row_error_aborts_batch() {
    let bound = bind("hamming_distance", &[DataType::Varchar, DataType::Varchar]);
    let left = ColumnVector::varchar(&["abc", "abc", "abc"]);
    let right = ColumnVector::varchar(&["abd", "ab", "abc"]);
    let result = bound.eval_batch(&[ColumnArg::Column(&left), ColumnArg::Column(&right)], 3);
    assert_eq!(result.unwrap_err(), ExecutorError::HammingLengthMismatch);
}

#[test]
fn test_malformed_utf8_is_tolerated() {
    let malformed = SqlValue::Varchar(vec![b'a', 0xFF, b'b', 0xC3].into());
    assert_eq!(eval("length", &[malformed.clone()]), Ok(SqlValue::Integer(4)));
    assert_eq!(
        eval("substr", &[malformed.clone(), int(2), int(2)]),
        Ok(SqlValue::Varchar(vec![0xFF, b'b'].into()))
    );
    assert_eq!(eval("strpos", &[malformed.clone(), varchar("b")]), Ok(SqlValue::Integer(3)));
    assert_eq!(eval("normalize", &[malformed.clone()]), Ok(malformed));
}
