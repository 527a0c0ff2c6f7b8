//! Edit distance functions: hamming_distance and levenshtein_distance
//!
//! Both compare characters; the ASCII paths compare bytes directly, the
//! generic paths compare decoded units. A malformed unit is compared by its
//! recovery length, so two malformed units of equal width count as equal.

use sqlstr_types::SqlValue;

use super::utf8::{self, Utf8Units};
use crate::errors::ExecutorError;
use crate::evaluator::dispatch::{KernelCapabilities, ScalarKernel};
use crate::evaluator::functions::string_arg;
use crate::limits::MAX_LEVENSHTEIN_COMBINED_INPUT_SIZE;

/// Number of positions at which `left` and `right` differ
pub(crate) fn hamming_distance(left: &[u8], right: &[u8], is_ascii: bool) -> Result<i64, ExecutorError> {
    if is_ascii {
        if left.len() != right.len() {
            return Err(ExecutorError::HammingLengthMismatch);
        }
        let distance = left.iter().zip(right).filter(|(a, b)| a != b).count();
        return Ok(distance as i64);
    }

    let mut left_units = Utf8Units::new(left);
    let mut right_units = Utf8Units::new(right);
    let mut distance = 0i64;
    loop {
        match (left_units.next(), right_units.next()) {
            (Some(a), Some(b)) => {
                if a.key() != b.key() {
                    distance += 1;
                }
            }
            (None, None) => return Ok(distance),
            _ => return Err(ExecutorError::HammingLengthMismatch),
        }
    }
}

/// Unit-cost edit distance over two rolling rows.
///
/// The row is sized to the shorter input; `left` and `right` are swapped
/// as needed, which does not change the distance.
pub(crate) fn levenshtein<T: PartialEq>(left: &[T], right: &[T]) -> Result<i64, ExecutorError> {
    if left.is_empty() {
        return Ok(right.len() as i64);
    }
    if right.is_empty() {
        return Ok(left.len() as i64);
    }
    if left.len().saturating_mul(right.len()) > MAX_LEVENSHTEIN_COMBINED_INPUT_SIZE {
        return Err(ExecutorError::LevenshteinInputTooLarge {
            left: left.len(),
            right: right.len(),
            max: MAX_LEVENSHTEIN_COMBINED_INPUT_SIZE,
        });
    }

    let (outer, inner) = if left.len() >= right.len() { (left, right) } else { (right, left) };

    let mut previous: Vec<usize> = (0..=inner.len()).collect();
    let mut current = vec![0usize; inner.len() + 1];

    for (i, outer_item) in outer.iter().enumerate() {
        current[0] = i + 1;
        for (j, inner_item) in inner.iter().enumerate() {
            current[j + 1] = if outer_item == inner_item {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    Ok(previous[inner.len()] as i64)
}

#[derive(Debug, Default)]
pub struct HammingDistanceFunction;

impl HammingDistanceFunction {
    fn eval(&self, args: &[SqlValue], is_ascii: bool) -> Result<SqlValue, ExecutorError> {
        let left = string_arg(self.name(), args, 0)?;
        let right = string_arg(self.name(), args, 1)?;
        hamming_distance(left.as_bytes(), right.as_bytes(), is_ascii).map(SqlValue::Integer)
    }
}

impl ScalarKernel for HammingDistanceFunction {
    fn name(&self) -> &'static str {
        "hamming_distance"
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
pub struct LevenshteinDistanceFunction;

impl ScalarKernel for LevenshteinDistanceFunction {
    fn name(&self) -> &'static str {
        "levenshtein_distance"
    }

    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::ascii()
    }

    fn call(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let left = string_arg(self.name(), args, 0)?;
        let right = string_arg(self.name(), args, 1)?;
        let left = utf8::to_code_points(left.as_bytes());
        let right = utf8::to_code_points(right.as_bytes());
        levenshtein(&left, &right).map(SqlValue::Integer)
    }

    fn call_ascii(&self, args: &[SqlValue]) -> Result<SqlValue, ExecutorError> {
        let left = string_arg(self.name(), args, 0)?;
        let right = string_arg(self.name(), args, 1)?;
        levenshtein(left.as_bytes(), right.as_bytes()).map(SqlValue::Integer)
    }
}
