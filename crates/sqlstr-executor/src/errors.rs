use sqlstr_types::{DataType, TypesError};

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorError {
    // Binding-time errors: raised once, before any row is evaluated
    UnknownFunction(String),
    NoMatchingSignature {
        name: String,
        arg_types: Vec<DataType>,
    },
    InvalidNormalizationForm(String),
    /// A control argument that must be a literal was bound to a column
    NonConstantArgument {
        function: String,
        position: usize,
    },

    // Per-row errors: abort evaluation of the whole query
    HammingLengthMismatch,
    LevenshteinInputTooLarge {
        left: usize,
        right: usize,
        max: usize,
    },
    EmptyPadString,
    PadSizeOutOfRange {
        size: i64,
        max: usize,
    },
    InvalidCodePoint(i64),
    NotSingleCharacter {
        length: usize,
    },
    InvalidUtf8 {
        function: String,
    },
    UnsupportedFeature(String),

    // Shape errors between the caller and a bound function
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },
    TypeMismatch {
        function: String,
        position: usize,
        expected: DataType,
        actual: String,
    },
    ColumnLengthMismatch {
        expected: usize,
        actual: usize,
    },
    Types(TypesError),
    Other(String),
}

impl ExecutorError {
    /// Whether the error is raised while binding a function, before any row runs
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            ExecutorError::UnknownFunction(_)
                | ExecutorError::NoMatchingSignature { .. }
                | ExecutorError::InvalidNormalizationForm(_)
                | ExecutorError::NonConstantArgument { .. }
        )
    }
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::UnknownFunction(name) => write!(f, "Function '{}' not found", name),
            ExecutorError::NoMatchingSignature { name, arg_types } => {
                write!(
                    f,
                    "Unexpected parameters ({}) for function {}",
                    arg_types.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", "),
                    name
                )
            }
            ExecutorError::InvalidNormalizationForm(form) => {
                write!(
                    f,
                    "Normalization form must be one of [NFD, NFC, NFKD, NFKC], got '{}'",
                    form
                )
            }
            ExecutorError::NonConstantArgument { function, position } => {
                write!(f, "Argument {} of {} must be a constant", position + 1, function)
            }
            ExecutorError::HammingLengthMismatch => {
                write!(
                    f,
                    "The input strings to hamming_distance function must have the same length"
                )
            }
            ExecutorError::LevenshteinInputTooLarge { left, right, max } => {
                write!(
                    f,
                    "The combined inputs size exceeded max Levenshtein distance combined input size ({}), \
                     the code points size of left is {}, code points size of right is {}",
                    max, left, right
                )
            }
            ExecutorError::EmptyPadString => write!(f, "padString must not be empty"),
            ExecutorError::PadSizeOutOfRange { size, max } => {
                write!(f, "pad size must be in the range [0..{}], got {}", max, size)
            }
            ExecutorError::InvalidCodePoint(code_point) => {
                write!(f, "Not a valid Unicode code point: {}", code_point)
            }
            ExecutorError::NotSingleCharacter { length } => {
                write!(
                    f,
                    "Unexpected parameters (varchar({})) for function codepoint. Expected: codepoint(varchar(1))",
                    length
                )
            }
            ExecutorError::InvalidUtf8 { function } => {
                write!(f, "Invalid UTF-8 encoding in argument to {}", function)
            }
            ExecutorError::UnsupportedFeature(msg) => write!(f, "Unsupported feature: {}", msg),
            ExecutorError::ArgumentCountMismatch { function, expected, actual } => {
                write!(f, "{} requires {} arguments, got {}", function, expected, actual)
            }
            ExecutorError::TypeMismatch { function, position, expected, actual } => {
                write!(
                    f,
                    "Argument {} of {} must be {}, got {}",
                    position + 1,
                    function,
                    expected,
                    actual
                )
            }
            ExecutorError::ColumnLengthMismatch { expected, actual } => {
                write!(f, "Column length mismatch: expected {} rows, got {}", expected, actual)
            }
            ExecutorError::Types(err) => write!(f, "{}", err),
            ExecutorError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ExecutorError {}

impl From<TypesError> for ExecutorError {
    fn from(err: TypesError) -> Self {
        ExecutorError::Types(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_errors_are_classified() {
        assert!(ExecutorError::InvalidNormalizationForm("NFX".to_string()).is_binding_error());
        assert!(ExecutorError::UnknownFunction("foo".to_string()).is_binding_error());
        assert!(!ExecutorError::HammingLengthMismatch.is_binding_error());
        assert!(!ExecutorError::EmptyPadString.is_binding_error());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ExecutorError::HammingLengthMismatch.to_string(),
            "The input strings to hamming_distance function must have the same length"
        );
        assert_eq!(
            ExecutorError::NoMatchingSignature {
                name: "substr".to_string(),
                arg_types: vec![DataType::Varchar, DataType::Boolean],
            }
            .to_string(),
            "Unexpected parameters (VARCHAR, BOOLEAN) for function substr"
        );
        assert_eq!(
            ExecutorError::InvalidCodePoint(-1).to_string(),
            "Not a valid Unicode code point: -1"
        );
    }

    #[test]
    fn test_types_error_converts() {
        let err: ExecutorError = TypesError::RangeOutOfBounds { start: 0, end: 9, len: 3 }.into();
        assert_eq!(err.to_string(), "Byte range [0, 9) out of bounds for buffer of 3 bytes");
    }
}
