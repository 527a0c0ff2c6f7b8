use sqlstr_types::SqlValue;
use xxhash_rust::xxh64::xxh64;

use crate::errors::ExecutorError;
use crate::evaluator::dispatch::ScalarKernel;
use crate::evaluator::functions::string_arg;

/// xxhash64(string) - XXH64 of the raw bytes with seed 0, as a signed integer
#[derive(Debug, Default)]
pub struct XxHash64Function;

impl ScalarKernel for XxHash64Function {
    fn name(&self) -> &'static str {
        "xxhash64"
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        Ok(SqlValue::Integer(xxh64(input.as_bytes(), 0) as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xxhash64_empty_input() {
        // Reference XXH64 digest of the empty input with seed 0
        let result = XxHash64Function.call(&[SqlValue::varchar("")]).unwrap();
        assert_eq!(result, SqlValue::Integer(0xEF46DB3751D8E999u64 as i64));
    }

    #[test]
    fn test_xxhash64_ignores_type_tag() {
        let text = XxHash64Function.call(&[SqlValue::varchar("hello")]).unwrap();
        let bytes = XxHash64Function.call(&[SqlValue::varbinary(b"hello")]).unwrap();
        assert_eq!(text, bytes);
        assert_ne!(text, XxHash64Function.call(&[SqlValue::varchar("hellp")]).unwrap());
    }
}
