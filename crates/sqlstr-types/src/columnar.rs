//! Columnar vectors for batch kernel evaluation
//!
//! This is deliberately the thinnest column format that can express what the
//! kernels need from their caller:
//!
//! - a NULL mask per column, so the calling loop can skip NULL rows
//! - string rows stored as views into shared buffers, so a kernel result that
//!   aliases its input can be stored without copying
//! - a column-level `is_ascii` flag, computed once when the column is built,
//!   which drives ASCII fast path selection for the whole batch
//!
//! ```text
//! StringColumn
//! ┌─────────────────────────────┐      buffers[0]: "Hello World"
//! │ slot 0: buf 0, [0, 5)  "Hello" ───────┘
//! │ slot 1: NULL                │
//! │ slot 2: buf 1, [0, 3)  "005" ──────── buffers[1]: owned kernel output
//! └─────────────────────────────┘
//! ```

use crate::error::TypesError;
use crate::string_value::{ByteRange, StringBuffer, StringValue};
use crate::{DataType, SqlValue};

/// Marks a slot whose bytes live in the builder's pending owned buffer
const PENDING_BUFFER: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Slot {
    buffer: usize,
    range: ByteRange,
}

/// VARCHAR/VARBINARY column: per-row views over one or more shared buffers.
#[derive(Debug, Clone)]
pub struct StringColumn {
    buffers: Vec<StringBuffer>,
    slots: Vec<Slot>,
    nulls: Vec<bool>,
    is_ascii: bool,
}

impl StringColumn {
    /// Build a column by copying all values into a single new buffer
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<[u8]>,
    {
        let mut data = Vec::new();
        let mut slots = Vec::new();
        let mut nulls = Vec::new();

        for value in values {
            match value {
                Some(value) => {
                    let start = data.len();
                    data.extend_from_slice(value.as_ref());
                    slots.push(Slot { buffer: 0, range: ByteRange::from_parts(start, data.len()) });
                    nulls.push(false);
                }
                None => {
                    slots.push(Slot { buffer: 0, range: ByteRange::default() });
                    nulls.push(true);
                }
            }
        }

        // NULL rows contribute no bytes, so scanning the buffer covers exactly the values
        let is_ascii = data.is_ascii();
        StringColumn { buffers: vec![StringBuffer::new(data)], slots, nulls, is_ascii }
    }

    /// Convenience constructor for a column without NULLs
    pub fn from_strs(values: &[&str]) -> Self {
        Self::from_values(values.iter().map(Some))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.nulls.get(index).copied().unwrap_or(true)
    }

    /// Whether every non-NULL value in the column is pure 7-bit ASCII
    pub fn is_ascii(&self) -> bool {
        self.is_ascii
    }

    pub fn buffers(&self) -> &[StringBuffer] {
        &self.buffers
    }

    /// Borrowed view of row `index`, or `None` for a NULL row
    pub fn get(&self, index: usize) -> Result<Option<StringValue>, TypesError> {
        let slot = self
            .slots
            .get(index)
            .ok_or(TypesError::RowIndexOutOfBounds { index, len: self.len() })?;
        if self.nulls[index] {
            return Ok(None);
        }
        let buffer = self
            .buffers
            .get(slot.buffer)
            .ok_or(TypesError::RowIndexOutOfBounds { index, len: self.len() })?;
        StringValue::borrowed(buffer, slot.range).map(Some)
    }
}

/// Incrementally builds a [`StringColumn`] from kernel results.
///
/// Borrowed results are stored as views of the buffer they already point
/// into; owned results are appended to one new buffer that the finished
/// column takes ownership of.
#[derive(Debug, Default)]
pub struct StringColumnBuilder {
    buffers: Vec<StringBuffer>,
    slots: Vec<Slot>,
    nulls: Vec<bool>,
    owned_data: Vec<u8>,
    has_pending: bool,
    is_ascii: bool,
}

impl StringColumnBuilder {
    pub fn with_capacity(rows: usize) -> Self {
        StringColumnBuilder {
            slots: Vec::with_capacity(rows),
            nulls: Vec::with_capacity(rows),
            is_ascii: true,
            ..Default::default()
        }
    }

    pub fn push_null(&mut self) {
        self.slots.push(Slot { buffer: 0, range: ByteRange::default() });
        self.nulls.push(true);
    }

    pub fn push(&mut self, value: StringValue) {
        self.is_ascii &= value.is_ascii();
        let slot = match value {
            StringValue::Borrowed { buffer, range } => {
                Slot { buffer: self.buffer_index(&buffer), range }
            }
            StringValue::Owned(buffer) => {
                let start = self.owned_data.len();
                self.owned_data.extend_from_slice(buffer.as_bytes());
                self.has_pending = true;
                Slot { buffer: PENDING_BUFFER, range: ByteRange::from_parts(start, self.owned_data.len()) }
            }
        };
        self.slots.push(slot);
        self.nulls.push(false);
    }

    fn buffer_index(&mut self, buffer: &StringBuffer) -> usize {
        // Consecutive rows nearly always alias the same input buffer
        if let Some(index) = self.buffers.iter().rposition(|b| b.ptr_eq(buffer)) {
            return index;
        }
        self.buffers.push(buffer.clone());
        self.buffers.len() - 1
    }

    pub fn finish(mut self) -> StringColumn {
        if self.has_pending {
            let index = self.buffers.len();
            self.buffers.push(StringBuffer::new(std::mem::take(&mut self.owned_data)));
            for slot in self.slots.iter_mut().filter(|slot| slot.buffer == PENDING_BUFFER) {
                slot.buffer = index;
            }
        }
        StringColumn {
            buffers: self.buffers,
            slots: self.slots,
            nulls: self.nulls,
            is_ascii: self.is_ascii,
        }
    }
}

/// Typed column data with NULL mask
#[derive(Debug, Clone)]
pub enum ColumnVector {
    Boolean { values: Vec<bool>, nulls: Vec<bool> },
    Integer { values: Vec<i64>, nulls: Vec<bool> },
    Varchar(StringColumn),
    Varbinary(StringColumn),
}

impl ColumnVector {
    /// VARCHAR column without NULLs
    pub fn varchar(values: &[&str]) -> Self {
        ColumnVector::Varchar(StringColumn::from_strs(values))
    }

    /// INTEGER column without NULLs
    pub fn integers(values: &[i64]) -> Self {
        ColumnVector::Integer { values: values.to_vec(), nulls: vec![false; values.len()] }
    }

    /// Build a column of `data_type` from scalar values (NULLs allowed)
    pub fn from_sql_values(data_type: DataType, values: &[SqlValue]) -> Result<Self, TypesError> {
        let mut builder = ColumnVectorBuilder::new(data_type, values.len());
        for value in values {
            builder.push(value.clone())?;
        }
        Ok(builder.finish())
    }

    /// Get the number of values in this column (including NULLs)
    pub fn len(&self) -> usize {
        match self {
            ColumnVector::Boolean { nulls, .. } => nulls.len(),
            ColumnVector::Integer { nulls, .. } => nulls.len(),
            ColumnVector::Varchar(column) | ColumnVector::Varbinary(column) => column.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnVector::Boolean { .. } => DataType::Boolean,
            ColumnVector::Integer { .. } => DataType::Integer,
            ColumnVector::Varchar(_) => DataType::Varchar,
            ColumnVector::Varbinary(_) => DataType::Varbinary,
        }
    }

    pub fn is_null(&self, index: usize) -> bool {
        match self {
            ColumnVector::Boolean { nulls, .. } | ColumnVector::Integer { nulls, .. } => {
                nulls.get(index).copied().unwrap_or(true)
            }
            ColumnVector::Varchar(column) | ColumnVector::Varbinary(column) => column.is_null(index),
        }
    }

    /// The string column behind a VARCHAR or VARBINARY vector
    pub fn as_string_column(&self) -> Option<&StringColumn> {
        match self {
            ColumnVector::Varchar(column) | ColumnVector::Varbinary(column) => Some(column),
            _ => None,
        }
    }

    /// Get the SQL value at the given index (string rows come back as borrowed views)
    pub fn get(&self, index: usize) -> Result<SqlValue, TypesError> {
        let out_of_bounds = TypesError::RowIndexOutOfBounds { index, len: self.len() };
        match self {
            ColumnVector::Boolean { values, nulls } => match nulls.get(index) {
                Some(true) => Ok(SqlValue::Null),
                Some(false) => Ok(SqlValue::Boolean(values[index])),
                None => Err(out_of_bounds),
            },
            ColumnVector::Integer { values, nulls } => match nulls.get(index) {
                Some(true) => Ok(SqlValue::Null),
                Some(false) => Ok(SqlValue::Integer(values[index])),
                None => Err(out_of_bounds),
            },
            ColumnVector::Varchar(column) => {
                Ok(column.get(index)?.map_or(SqlValue::Null, SqlValue::Varchar))
            }
            ColumnVector::Varbinary(column) => {
                Ok(column.get(index)?.map_or(SqlValue::Null, SqlValue::Varbinary))
            }
        }
    }

    /// All rows as scalar values
    pub fn to_sql_values(&self) -> Result<Vec<SqlValue>, TypesError> {
        (0..self.len()).map(|index| self.get(index)).collect()
    }
}

/// Builds a [`ColumnVector`] of a fixed type one value at a time
#[derive(Debug)]
pub enum ColumnVectorBuilder {
    Boolean { values: Vec<bool>, nulls: Vec<bool> },
    Integer { values: Vec<i64>, nulls: Vec<bool> },
    Varchar(StringColumnBuilder),
    Varbinary(StringColumnBuilder),
}

impl ColumnVectorBuilder {
    pub fn new(data_type: DataType, capacity: usize) -> Self {
        match data_type {
            DataType::Boolean => ColumnVectorBuilder::Boolean {
                values: Vec::with_capacity(capacity),
                nulls: Vec::with_capacity(capacity),
            },
            DataType::Integer => ColumnVectorBuilder::Integer {
                values: Vec::with_capacity(capacity),
                nulls: Vec::with_capacity(capacity),
            },
            DataType::Varchar => {
                ColumnVectorBuilder::Varchar(StringColumnBuilder::with_capacity(capacity))
            }
            DataType::Varbinary => {
                ColumnVectorBuilder::Varbinary(StringColumnBuilder::with_capacity(capacity))
            }
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnVectorBuilder::Boolean { .. } => DataType::Boolean,
            ColumnVectorBuilder::Integer { .. } => DataType::Integer,
            ColumnVectorBuilder::Varchar(_) => DataType::Varchar,
            ColumnVectorBuilder::Varbinary(_) => DataType::Varbinary,
        }
    }

    pub fn push_null(&mut self) {
        match self {
            ColumnVectorBuilder::Boolean { values, nulls } => {
                values.push(false);
                nulls.push(true);
            }
            ColumnVectorBuilder::Integer { values, nulls } => {
                values.push(0);
                nulls.push(true);
            }
            ColumnVectorBuilder::Varchar(builder) | ColumnVectorBuilder::Varbinary(builder) => {
                builder.push_null()
            }
        }
    }

    /// Append a value; NULL is accepted for every type
    pub fn push(&mut self, value: SqlValue) -> Result<(), TypesError> {
        match (self, value) {
            (builder, SqlValue::Null) => builder.push_null(),
            (ColumnVectorBuilder::Boolean { values, nulls }, SqlValue::Boolean(b)) => {
                values.push(b);
                nulls.push(false);
            }
            (ColumnVectorBuilder::Integer { values, nulls }, SqlValue::Integer(n)) => {
                values.push(n);
                nulls.push(false);
            }
            (ColumnVectorBuilder::Varchar(builder), SqlValue::Varchar(s))
            | (ColumnVectorBuilder::Varbinary(builder), SqlValue::Varbinary(s)) => builder.push(s),
            (builder, value) => {
                return Err(TypesError::TypeMismatch {
                    expected: builder.data_type().to_string(),
                    actual: value.type_name(),
                })
            }
        }
        Ok(())
    }

    pub fn finish(self) -> ColumnVector {
        match self {
            ColumnVectorBuilder::Boolean { values, nulls } => ColumnVector::Boolean { values, nulls },
            ColumnVectorBuilder::Integer { values, nulls } => ColumnVector::Integer { values, nulls },
            ColumnVectorBuilder::Varchar(builder) => ColumnVector::Varchar(builder.finish()),
            ColumnVectorBuilder::Varbinary(builder) => ColumnVector::Varbinary(builder.finish()),
        }
    }
}
