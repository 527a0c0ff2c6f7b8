//! Tests for result buffer ownership: slicing kernels return views of their
//! input, materializing kernels return fresh buffers, and views keep their
//! source alive

mod common;

use common::bind;
use sqlstr_executor::ColumnArg;
use sqlstr_types::{ColumnVector, DataType, SqlValue, StringColumn};

use DataType::{Integer, Varchar};

fn input_column() -> ColumnVector {
    ColumnVector::varchar(&["  Hello World  ", "  héllo wörld  "])
}

fn shares_buffer(output: &ColumnVector, input: &ColumnVector) -> bool {
    let input_buffer = &input.as_string_column().unwrap().buffers()[0];
    output.as_string_column().unwrap().buffers().iter().any(|b| b.ptr_eq(input_buffer))
}

// ============================================================================
// Aliasing kernels
// ============================================================================

#[test]
fn test_slicing_kernels_declare_aliasing() {
    for (name, types) in [
        ("substr", vec![Varchar, Integer]),
        ("trail", vec![Varchar, Integer]),
        ("trim", vec![Varchar]),
        ("ltrim", vec![Varchar, Varchar]),
        ("rtrim", vec![Varchar]),
    ] {
        let bound = bind(name, &types);
        assert!(bound.capabilities().aliases_input_argument(0), "{} should alias", name);
    }
    let substr_binary = bind("substr_varbinary", &[DataType::Varbinary, Integer]);
    assert!(substr_binary.capabilities().aliases_input_argument(0));
}

#[test]
fn test_slicing_results_are_views_of_input() {
    let input = input_column();

    let trimmed = bind("trim", &[Varchar]).eval_batch(&[ColumnArg::Column(&input)], 2).unwrap();
    assert!(shares_buffer(&trimmed, &input));
    // No bytes were copied into a buffer of the output's own
    assert_eq!(trimmed.as_string_column().unwrap().buffers().len(), 1);
    assert_eq!(trimmed.get(1).unwrap(), SqlValue::varchar("héllo wörld"));

    let sliced = bind("substr", &[Varchar, Integer, Integer])
        .eval_batch(
            &[
                ColumnArg::Column(&input),
                ColumnArg::Constant(SqlValue::Integer(3)),
                ColumnArg::Constant(SqlValue::Integer(5)),
            ],
            2,
        )
        .unwrap();
    assert!(shares_buffer(&sliced, &input));
    assert_eq!(sliced.get(0).unwrap(), SqlValue::varchar("Hello"));
}

#[test]
fn test_views_outlive_the_input_column() {
    let input = input_column();
    let input_buffer = input.as_string_column().unwrap().buffers()[0].clone();
    let handles_before = input_buffer.handle_count();

    let trail = bind("trail", &[Varchar, Integer])
        .eval_batch(&[ColumnArg::Column(&input), ColumnArg::Constant(SqlValue::Integer(7))], 2)
        .unwrap();
    assert!(input_buffer.handle_count() > handles_before);

    drop(input);
    assert_eq!(trail.get(0).unwrap(), SqlValue::varchar("World  "));
    assert_eq!(trail.get(1).unwrap(), SqlValue::varchar("wörld  "));
}

// ============================================================================
// Materializing kernels
// ============================================================================

#[test]
fn test_materializing_kernels_do_not_alias() {
    for (name, types) in [
        ("lpad", vec![Varchar, Integer, Varchar]),
        ("normalize", vec![Varchar]),
        ("chr", vec![Integer]),
        ("xxhash64", vec![Varchar]),
        ("levenshtein_distance", vec![Varchar, Varchar]),
    ] {
        let bound = bind(name, &types);
        assert_eq!(bound.capabilities().reuses_strings_from_arg, None, "{} must not alias", name);
    }
}

#[test]
fn test_pad_and_normalize_write_new_buffers() {
    let input = input_column();

    let padded = bind("rpad", &[Varchar, Integer, Varchar])
        .eval_batch(
            &[
                ColumnArg::Column(&input),
                ColumnArg::Constant(SqlValue::Integer(4)),
                ColumnArg::Constant(SqlValue::varchar("-")),
            ],
            2,
        )
        .unwrap();
    assert!(!shares_buffer(&padded, &input));
    assert_eq!(padded.get(0).unwrap(), SqlValue::varchar("  He"));

    let normalized = bind("normalize", &[Varchar]).eval_batch(&[ColumnArg::Column(&input)], 2).unwrap();
    assert!(!shares_buffer(&normalized, &input));
    assert_eq!(normalized.get(1).unwrap(), SqlValue::varchar("  héllo wörld  "));
}

#[test]
fn test_null_rows_in_sliced_output() {
    let input = ColumnVector::Varchar(StringColumn::from_values(vec![Some(" a "), None, Some(" b ")]));
    let trimmed = bind("trim", &[Varchar]).eval_batch(&[ColumnArg::Column(&input)], 3).unwrap();
    assert!(trimmed.is_null(1));
    assert_eq!(
        trimmed.to_sql_values().unwrap(),
        vec![SqlValue::varchar("a"), SqlValue::Null, SqlValue::varchar("b")]
    );
}
