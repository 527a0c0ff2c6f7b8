//! SQL Function Implementations
//!
//! Every function is a [`ScalarKernel`](crate::evaluator::dispatch::ScalarKernel)
//! registered under one or more typed signatures. The main entry point is
//! [`register_string_functions`], which installs the string catalog into a
//! [`FunctionRegistry`].

use sqlstr_types::{DataType, SqlValue, StringValue};

use crate::errors::ExecutorError;
use crate::evaluator::registry::FunctionRegistry;

pub mod string;

use string::{
    ChrFunction, CodePointFunction, EndsWithFunction, HammingDistanceFunction,
    LengthFunction, LengthVarbinaryFunction, LevenshteinDistanceFunction, NormalizeFunction,
    PadFunction, PadSide, SearchDirection, StartsWithFunction, StrPosFunction, SubstrFunction,
    SubstrVarbinaryFunction, TrailFunction, TrimFunction, TrimSide, XxHash64Function,
};

use DataType::{Boolean, Integer, Varbinary, Varchar};

fn argument<'a>(function: &str, args: &'a [SqlValue], position: usize) -> Result<&'a SqlValue, ExecutorError> {
    args.get(position).ok_or_else(|| ExecutorError::ArgumentCountMismatch {
        function: function.to_string(),
        expected: position + 1,
        actual: args.len(),
    })
}

/// VARCHAR or VARBINARY argument at `position`
pub(crate) fn string_arg<'a>(
    function: &str,
    args: &'a [SqlValue],
    position: usize,
) -> Result<&'a StringValue, ExecutorError> {
    let value = argument(function, args, position)?;
    value.as_string_value().ok_or_else(|| ExecutorError::TypeMismatch {
        function: function.to_string(),
        position,
        expected: Varchar,
        actual: value.type_name(),
    })
}

/// INTEGER argument at `position`
pub(crate) fn integer_arg(function: &str, args: &[SqlValue], position: usize) -> Result<i64, ExecutorError> {
    let value = argument(function, args, position)?;
    value.as_integer().ok_or_else(|| ExecutorError::TypeMismatch {
        function: function.to_string(),
        position,
        expected: Integer,
        actual: value.type_name(),
    })
}

/// Trailing optional INTEGER argument; `None` when the caller omitted it
pub(crate) fn optional_integer_arg(
    function: &str,
    args: &[SqlValue],
    position: usize,
) -> Result<Option<i64>, ExecutorError> {
    if position >= args.len() {
        return Ok(None);
    }
    integer_arg(function, args, position).map(Some)
}

/// Install the string function catalog
pub fn register_string_functions(registry: &mut FunctionRegistry) {
    registry.register("chr", &[Integer], Varchar, || Box::new(ChrFunction));
    registry.register("codepoint", &[Varchar], Integer, || Box::new(CodePointFunction));

    // Substring
    registry.register("substr", &[Varchar, Integer], Varchar, || Box::new(SubstrFunction));
    registry.register("substr", &[Varchar, Integer, Integer], Varchar, || Box::new(SubstrFunction));
    for name in ["substr", "substr_varbinary"] {
        registry.register(name, &[Varbinary, Integer], Varbinary, || Box::new(SubstrVarbinaryFunction));
        registry.register(name, &[Varbinary, Integer, Integer], Varbinary, || {
            Box::new(SubstrVarbinaryFunction)
        });
    }
    registry.register("trail", &[Varchar, Integer], Varchar, || Box::new(TrailFunction));

    // Trim
    for signature in [&[Varchar][..], &[Varchar, Varchar][..]] {
        registry.register("trim", signature, Varchar, || Box::new(TrimFunction::new(TrimSide::Both)));
        registry.register("ltrim", signature, Varchar, || Box::new(TrimFunction::new(TrimSide::Leading)));
        registry.register("rtrim", signature, Varchar, || Box::new(TrimFunction::new(TrimSide::Trailing)));
    }

    // Pad
    registry.register("lpad", &[Varchar, Integer, Varchar], Varchar, || Box::new(PadFunction::new(PadSide::Left)));
    registry.register("rpad", &[Varchar, Integer, Varchar], Varchar, || Box::new(PadFunction::new(PadSide::Right)));

    // Search
    for signature in [&[Varchar, Varchar][..], &[Varchar, Varchar, Integer][..]] {
        registry.register("strpos", signature, Integer, || {
            Box::new(StrPosFunction::new(SearchDirection::FromStart))
        });
        registry.register("strrpos", signature, Integer, || {
            Box::new(StrPosFunction::new(SearchDirection::FromEnd))
        });
    }
    registry.register("starts_with", &[Varchar, Varchar], Boolean, || Box::new(StartsWithFunction));
    registry.register("ends_with", &[Varchar, Varchar], Boolean, || Box::new(EndsWithFunction));

    // Length
    registry.register("length", &[Varchar], Integer, || Box::new(LengthFunction));
    registry.register("length", &[Varbinary], Integer, || Box::new(LengthVarbinaryFunction));
    registry.register("length_varbinary", &[Varbinary], Integer, || Box::new(LengthVarbinaryFunction));

    // Distance
    registry.register("hamming_distance", &[Varchar, Varchar], Integer, || Box::new(HammingDistanceFunction));
    registry.register("levenshtein_distance", &[Varchar, Varchar], Integer, || {
        Box::new(LevenshteinDistanceFunction)
    });

    // Normalization
    registry.register("normalize", &[Varchar], Varchar, || Box::new(NormalizeFunction::default()));
    registry.register("normalize", &[Varchar, Varchar], Varchar, || Box::new(NormalizeFunction::default()));

    // Hashing
    registry.register("xxhash64", &[Varchar], Integer, || Box::new(XxHash64Function));
    registry.register("xxhash64", &[Varbinary], Integer, || Box::new(XxHash64Function));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_arg_errors() {
        let args = [SqlValue::Integer(1)];
        assert!(matches!(
            string_arg("substr", &args, 0),
            Err(ExecutorError::TypeMismatch { position: 0, expected: Varchar, .. })
        ));
        assert!(matches!(
            string_arg("substr", &args, 1),
            Err(ExecutorError::ArgumentCountMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_optional_integer_arg() {
        let args = [SqlValue::varchar("abc"), SqlValue::Integer(2)];
        assert_eq!(optional_integer_arg("substr", &args, 1), Ok(Some(2)));
        assert_eq!(optional_integer_arg("substr", &args, 2), Ok(None));
        assert!(optional_integer_arg("substr", &args, 0).is_err());
    }
}
