//! normalize(string [, form]) - Unicode normalization
//!
//! The form is resolved once when the function is bound; rows only run the
//! transform. Output is always a new buffer.

use sqlstr_types::{SqlValue, StringValue};
use unicode_normalization::UnicodeNormalization;

use crate::errors::ExecutorError;
use crate::evaluator::dispatch::ScalarKernel;
use crate::evaluator::functions::string_arg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NormalizationForm {
    #[default]
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

const NORMALIZATION_FORMS: [(&str, NormalizationForm); 4] = [
    ("NFC", NormalizationForm::Nfc),
    ("NFD", NormalizationForm::Nfd),
    ("NFKC", NormalizationForm::Nfkc),
    ("NFKD", NormalizationForm::Nfkd),
];

impl NormalizationForm {
    /// Look up a form by its exact upper-case name
    pub fn from_name(name: &str) -> Option<Self> {
        NORMALIZATION_FORMS.iter().find(|(n, _)| *n == name).map(|(_, form)| *form)
    }

    pub fn name(self) -> &'static str {
        match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfkd => "NFKD",
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct NormalizeFunction {
    form: NormalizationForm,
}

impl NormalizeFunction {
    pub fn form(&self) -> NormalizationForm {
        self.form
    }
}

impl ScalarKernel for NormalizeFunction {
    fn name(&self) -> &'static str {
        "normalize"
    }

    /// Resolve the form argument.
    ///
    /// A NULL literal form is accepted here; every row then evaluates to NULL
    /// before the kernel is reached.
    fn initialize(&mut self, constants: &[Option<SqlValue>]) -> Result<(), ExecutorError> {
        if constants.len() < 2 {
            self.form = NormalizationForm::Nfc;
            return Ok(());
        }
        match &constants[1] {
            None => Err(ExecutorError::NonConstantArgument {
                function: self.name().to_string(),
                position: 1,
            }),
            Some(SqlValue::Null) => Ok(()),
            Some(SqlValue::Varchar(form)) => {
                let name = String::from_utf8_lossy(form.as_bytes());
                self.form = NormalizationForm::from_name(&name)
                    .ok_or_else(|| ExecutorError::InvalidNormalizationForm(name.into_owned()))?;
                Ok(())
            }
            Some(other) => Err(ExecutorError::TypeMismatch {
                function: self.name().to_string(),
                position: 1,
                expected: sqlstr_types::DataType::Varchar,
                actual: other.type_name(),
            }),
        }
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let input = string_arg(self.name(), args, 0)?;
        let normalized = match input.as_str() {
            Some(text) => StringValue::owned(self.form.apply(text).into_bytes()),
            None => {
                log::warn!(
                    "normalize({}): input is not valid UTF-8, returning it unchanged",
                    self.form.name()
                );
                input.to_owned_value()
            }
        };
        Ok(SqlValue::Varchar(normalized))
    }
}
