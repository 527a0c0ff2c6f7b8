//! Column batch evaluation
//!
//! Drives a [`BoundFunction`] over whole columns. The ASCII/generic decision
//! is made once per batch from column metadata; NULL rows are skipped on the
//! kernel's behalf; the first kernel error aborts the batch.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use sqlstr_types::{ColumnVector, ColumnVectorBuilder, DataType, SqlValue};

use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{self, Encoding};
use crate::evaluator::registry::BoundFunction;

/// One argument of a batch call
#[derive(Debug, Clone)]
pub enum ColumnArg<'a> {
    /// One value per row
    Column(&'a ColumnVector),
    /// The same value for every row
    Constant(SqlValue),
}

impl ColumnArg<'_> {
    fn data_type(&self) -> Option<DataType> {
        match self {
            ColumnArg::Column(column) => Some(column.data_type()),
            ColumnArg::Constant(value) => value.data_type(),
        }
    }

    /// Whether this argument can only carry ASCII text
    fn is_ascii_text(&self) -> bool {
        match self {
            ColumnArg::Column(ColumnVector::Varchar(column)) => column.is_ascii(),
            ColumnArg::Constant(SqlValue::Varchar(value)) => value.is_ascii(),
            _ => true,
        }
    }

    fn value(&self, row: usize) -> Result<SqlValue, ExecutorError> {
        match self {
            ColumnArg::Column(column) => Ok(column.get(row)?),
            ColumnArg::Constant(value) => Ok(value.clone()),
        }
    }
}

/// Independent set of arguments for [`BoundFunction::eval_batches_parallel`]
#[derive(Debug, Clone)]
pub struct ColumnBatch<'a> {
    pub args: Vec<ColumnArg<'a>>,
    pub num_rows: usize,
}

impl<'a> ColumnBatch<'a> {
    pub fn new(args: Vec<ColumnArg<'a>>, num_rows: usize) -> Self {
        ColumnBatch { args, num_rows }
    }
}

impl BoundFunction {
    /// Evaluate `num_rows` rows, choosing the kernel implementation once
    pub fn eval_batch(&self, args: &[ColumnArg<'_>], num_rows: usize) -> Result<ColumnVector, ExecutorError> {
        self.check_batch(args, num_rows)?;
        let encoding = self.select_encoding(args);
        self.run_batch(args, num_rows, encoding)
    }

    /// Evaluate with an explicit implementation choice.
    ///
    /// `Encoding::Ascii` is rejected when any string input may hold
    /// non-ASCII text; `Encoding::Generic` is always valid.
    pub fn eval_batch_with_encoding(
        &self,
        args: &[ColumnArg<'_>],
        num_rows: usize,
        encoding: Encoding,
    ) -> Result<ColumnVector, ExecutorError> {
        self.check_batch(args, num_rows)?;
        if encoding == Encoding::Ascii && !args.iter().all(ColumnArg::is_ascii_text) {
            return Err(ExecutorError::UnsupportedFeature(format!(
                "ASCII evaluation of {} requested for non-ASCII input",
                self.name
            )));
        }
        self.run_batch(args, num_rows, encoding)
    }

    /// Evaluate independent batches, in parallel once there are enough of them
    pub fn eval_batches_parallel(&self, batches: &[ColumnBatch<'_>]) -> Result<Vec<ColumnVector>, ExecutorError> {
        #[cfg(feature = "parallel")]
        {
            if self.config.should_parallelize(batches.len()) {
                log::trace!("{}: evaluating {} batches in parallel", self.name, batches.len());
                return batches
                    .par_iter()
                    .map(|batch| self.eval_batch(&batch.args, batch.num_rows))
                    .collect();
            }
        }

        batches.iter().map(|batch| self.eval_batch(&batch.args, batch.num_rows)).collect()
    }

    /// Implementation used for a batch with these arguments
    pub fn select_encoding(&self, args: &[ColumnArg<'_>]) -> Encoding {
        let encoding = if self.config.ascii_fast_path
            && self.kernel.capabilities().has_ascii_fast_path
            && args.iter().all(ColumnArg::is_ascii_text)
        {
            Encoding::Ascii
        } else {
            Encoding::Generic
        };
        log::trace!("{}: batch uses {:?} path", self.name, encoding);
        encoding
    }

    fn check_batch(&self, args: &[ColumnArg<'_>], num_rows: usize) -> Result<(), ExecutorError> {
        let expected = &self.signature.arg_types;
        if args.len() != expected.len() {
            return Err(ExecutorError::ArgumentCountMismatch {
                function: self.name.clone(),
                expected: expected.len(),
                actual: args.len(),
            });
        }

        for (position, (arg, expected)) in args.iter().zip(expected).enumerate() {
            if let ColumnArg::Column(column) = arg {
                if column.len() != num_rows {
                    return Err(ExecutorError::ColumnLengthMismatch {
                        expected: num_rows,
                        actual: column.len(),
                    });
                }
            }
            match arg.data_type() {
                Some(actual) if actual != *expected => {
                    return Err(ExecutorError::TypeMismatch {
                        function: self.name.clone(),
                        position,
                        expected: *expected,
                        actual: actual.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn run_batch(
        &self,
        args: &[ColumnArg<'_>],
        num_rows: usize,
        encoding: Encoding,
    ) -> Result<ColumnVector, ExecutorError> {
        let mut builder = ColumnVectorBuilder::new(self.signature.return_type, num_rows);
        let mut row_args = Vec::with_capacity(args.len());

        for row in 0..num_rows {
            row_args.clear();
            for arg in args {
                row_args.push(arg.value(row)?);
            }

            if row_args.iter().any(SqlValue::is_null) {
                builder.push_null();
                continue;
            }

            let result = dispatch::invoke(self.kernel.as_ref(), encoding, &row_args)?;
            builder.push(result)?;
        }

        Ok(builder.finish())
    }
}
