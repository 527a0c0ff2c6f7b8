//! Common test utilities for string kernel tests

use sqlstr_executor::{BoundFunction, ColumnArg, Encoding, ExecutorError, FunctionRegistry, KernelConfig};
use sqlstr_types::{ColumnVector, DataType, SqlValue};

/// Bind `name` for the given argument types with no literal arguments
#[allow(dead_code)] // Test helper - available for all test modules
pub fn bind(name: &str, arg_types: &[DataType]) -> BoundFunction {
    FunctionRegistry::with_string_functions()
        .bind(name, arg_types, &[])
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", name, e))
        .with_config(KernelConfig::default())
}

/// Evaluate `name` on literal arguments, binding from the value types.
///
/// Every argument is passed to `initialize` as a constant, the way a planner
/// would for a fully literal call.
#[allow(dead_code)] // Test helper - available for all test modules
pub fn eval(name: &str, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
    let arg_types: Vec<DataType> =
        args.iter().map(|arg| arg.data_type().unwrap_or(DataType::Varchar)).collect();
    let constants: Vec<Option<SqlValue>> = args.iter().cloned().map(Some).collect();
    let bound = FunctionRegistry::with_string_functions().bind(name, &arg_types, &constants)?;
    bound.eval_row(args)
}

/// Evaluate and unwrap a VARCHAR result as text
#[allow(dead_code)] // Test helper - available for all test modules
pub fn eval_text(name: &str, args: &[SqlValue]) -> String {
    match eval(name, args) {
        Ok(SqlValue::Varchar(s)) => String::from_utf8(s.as_bytes().to_vec()).expect("utf-8 result"),
        other => panic!("{} returned {:?}", name, other),
    }
}

/// Evaluate and unwrap an INTEGER result
#[allow(dead_code)] // Test helper - available for all test modules
pub fn eval_int(name: &str, args: &[SqlValue]) -> i64 {
    match eval(name, args) {
        Ok(SqlValue::Integer(n)) => n,
        other => panic!("{} returned {:?}", name, other),
    }
}

#[allow(dead_code)] // Test helper - available for all test modules
pub fn varchar(s: &str) -> SqlValue {
    SqlValue::varchar(s)
}

#[allow(dead_code)] // Test helper - available for all test modules
pub fn int(n: i64) -> SqlValue {
    SqlValue::Integer(n)
}

/// Run one batch through both implementations and return the shared result.
///
/// Panics if the ASCII and generic outputs differ in any row.
#[allow(dead_code)] // Test helper - available for all test modules
pub fn eval_both_paths(bound: &BoundFunction, args: &[ColumnArg<'_>], num_rows: usize) -> Vec<SqlValue> {
    let ascii = bound
        .eval_batch_with_encoding(args, num_rows, Encoding::Ascii)
        .unwrap_or_else(|e| panic!("{} ascii path failed: {}", bound.name(), e));
    let generic = bound
        .eval_batch_with_encoding(args, num_rows, Encoding::Generic)
        .unwrap_or_else(|e| panic!("{} generic path failed: {}", bound.name(), e));

    let ascii = ascii.to_sql_values().unwrap();
    let generic = generic.to_sql_values().unwrap();
    assert_eq!(ascii, generic, "{}: ascii and generic paths disagree", bound.name());
    generic
}

/// ASCII column with edge-case shapes: empty, whitespace-only, repeats
#[allow(dead_code)] // Test helper - available for all test modules
pub fn ascii_corpus() -> ColumnVector {
    ColumnVector::varchar(&[
        "",
        "a",
        "Hello World",
        "  padded  ",
        "\t\ttabs\n",
        "abcabcabc",
        "aaaa",
        "kitten",
        "The quick brown fox jumps over the lazy dog",
        "   ",
    ])
}
