//! Shared byte buffers and borrowed/owned string views
//!
//! A [`StringValue`] is always a view of a reference-counted [`StringBuffer`].
//! The ownership tag records whether a kernel produced the bytes itself
//! (`Owned`) or is handing back a sub-range of a buffer somebody else
//! allocated (`Borrowed`). Either way the buffer stays alive for as long as
//! any view of it exists, so a kernel result can outlive the column batch it
//! was computed from without copying.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::TypesError;

/// Half-open `[start, end)` byte offsets into a buffer.
///
/// Always satisfies `start <= end`; the constructor additionally checks
/// `end <= buffer_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteRange {
    start: usize,
    end: usize,
}

impl ByteRange {
    /// Create a range, checking it lies within a buffer of `buffer_len` bytes
    pub fn new(start: usize, end: usize, buffer_len: usize) -> Result<Self, TypesError> {
        if start > end || end > buffer_len {
            return Err(TypesError::RangeOutOfBounds { start, end, len: buffer_len });
        }
        Ok(ByteRange { start, end })
    }

    /// Range covering a whole buffer of `len` bytes
    pub const fn full(len: usize) -> Self {
        ByteRange { start: 0, end: len }
    }

    /// Bounds already known to be valid for the buffer being built
    pub(crate) fn from_parts(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        ByteRange { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Resolve `[start, end)`, given relative to this range, to absolute offsets
    pub fn sub_range(&self, start: usize, end: usize) -> Result<ByteRange, TypesError> {
        if start > end || end > self.len() {
            return Err(TypesError::RangeOutOfBounds { start, end, len: self.len() });
        }
        Ok(ByteRange { start: self.start + start, end: self.start + end })
    }
}

/// Immutable, reference-counted byte buffer backing one or more string views.
#[derive(Clone, Default)]
pub struct StringBuffer(Arc<[u8]>);

impl StringBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        StringBuffer(Arc::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether two handles refer to the same allocation
    pub fn ptr_eq(&self, other: &StringBuffer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles (buffers, views and columns) to this allocation
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl fmt::Debug for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuffer").field("len", &self.len()).finish()
    }
}

impl From<Vec<u8>> for StringBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        StringBuffer::new(bytes)
    }
}

/// A VARCHAR or VARBINARY value: a view of bytes with an explicit ownership tag.
///
/// Never NUL-terminated, and not required to be valid UTF-8.
#[derive(Clone)]
pub enum StringValue {
    /// Sub-range of a buffer the value does not own (typically an input column)
    Borrowed { buffer: StringBuffer, range: ByteRange },
    /// Freshly materialized bytes; the whole buffer belongs to this value
    Owned(StringBuffer),
}

impl StringValue {
    /// Take ownership of `bytes` as a new buffer
    pub fn owned(bytes: impl Into<Vec<u8>>) -> Self {
        StringValue::Owned(StringBuffer::new(bytes.into()))
    }

    /// View `range` of `buffer`, checking the range against the buffer length
    pub fn borrowed(buffer: &StringBuffer, range: ByteRange) -> Result<Self, TypesError> {
        if range.end() > buffer.len() {
            return Err(TypesError::RangeOutOfBounds {
                start: range.start(),
                end: range.end(),
                len: buffer.len(),
            });
        }
        Ok(StringValue::Borrowed { buffer: buffer.clone(), range })
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            StringValue::Borrowed { buffer, range } => &buffer.as_bytes()[range.start()..range.end()],
            StringValue::Owned(buffer) => buffer.as_bytes(),
        }
    }

    /// The text, when the bytes are valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_ascii(&self) -> bool {
        self.as_bytes().is_ascii()
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, StringValue::Borrowed { .. })
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, StringValue::Owned(_))
    }

    /// Handle to the backing buffer, whichever way the value holds it
    pub fn buffer(&self) -> &StringBuffer {
        match self {
            StringValue::Borrowed { buffer, .. } => buffer,
            StringValue::Owned(buffer) => buffer,
        }
    }

    /// Absolute range of this value within [`Self::buffer`]
    pub fn range(&self) -> ByteRange {
        match self {
            StringValue::Borrowed { range, .. } => *range,
            StringValue::Owned(buffer) => ByteRange::full(buffer.len()),
        }
    }

    /// Zero-copy view of `[start, end)` relative to this value.
    ///
    /// The result is always `Borrowed` and shares this value's buffer.
    pub fn slice(&self, start: usize, end: usize) -> Result<StringValue, TypesError> {
        let range = self.range().sub_range(start, end)?;
        Ok(StringValue::Borrowed { buffer: self.buffer().clone(), range })
    }

    /// Zero-length view anchored at the start of this value
    pub fn empty_view(&self) -> StringValue {
        StringValue::Borrowed {
            buffer: self.buffer().clone(),
            range: ByteRange { start: self.range().start(), end: self.range().start() },
        }
    }

    /// Copy the bytes into a buffer owned by the returned value
    pub fn to_owned_value(&self) -> StringValue {
        StringValue::owned(self.as_bytes().to_vec())
    }
}

impl PartialEq for StringValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StringValue {}

impl Hash for StringValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_borrowed() { "Borrowed" } else { "Owned" };
        write!(f, "{}({:?})", tag, String::from_utf8_lossy(self.as_bytes()))
    }
}

impl From<&str> for StringValue {
    fn from(s: &str) -> Self {
        StringValue::owned(s.as_bytes())
    }
}

impl From<String> for StringValue {
    fn from(s: String) -> Self {
        StringValue::owned(s.into_bytes())
    }
}

impl From<&[u8]> for StringValue {
    fn from(bytes: &[u8]) -> Self {
        StringValue::owned(bytes)
    }
}

impl From<Vec<u8>> for StringValue {
    fn from(bytes: Vec<u8>) -> Self {
        StringValue::owned(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range_rejects_out_of_bounds() {
        assert!(ByteRange::new(0, 5, 5).is_ok());
        assert!(ByteRange::new(2, 1, 5).is_err());
        assert_eq!(
            ByteRange::new(0, 6, 5),
            Err(TypesError::RangeOutOfBounds { start: 0, end: 6, len: 5 })
        );
    }

    #[test]
    fn test_sub_range_is_relative() {
        let range = ByteRange::new(3, 10, 10).unwrap();
        let sub = range.sub_range(1, 4).unwrap();
        assert_eq!((sub.start(), sub.end()), (4, 7));
        assert!(range.sub_range(0, 8).is_err());
    }

    #[test]
    fn test_slice_shares_buffer() {
        let value = StringValue::from("Hello World");
        let world = value.slice(6, 11).unwrap();
        assert!(world.is_borrowed());
        assert!(world.buffer().ptr_eq(value.buffer()));
        assert_eq!(world.as_bytes(), b"World");

        // Slicing a slice stays relative to the view, not the buffer
        let orl = world.slice(1, 4).unwrap();
        assert_eq!(orl.as_bytes(), b"orl");
        assert!(world.slice(0, 6).is_err());
    }

    #[test]
    fn test_view_keeps_buffer_alive() {
        let view = {
            let value = StringValue::from("transient");
            value.slice(0, 5).unwrap()
        };
        assert_eq!(view.as_bytes(), b"trans");
        assert_eq!(view.buffer().handle_count(), 1);
    }

    #[test]
    fn test_equality_ignores_ownership() {
        let owned = StringValue::from("abc");
        let borrowed = StringValue::from("xabcx").slice(1, 4).unwrap();
        assert_eq!(owned, borrowed);
        assert!(borrowed.to_owned_value().is_owned());
    }

    #[test]
    fn test_empty_view() {
        let value = StringValue::from("abc").slice(1, 3).unwrap();
        let empty = value.empty_view();
        assert!(empty.is_empty());
        assert!(empty.is_borrowed());
        assert_eq!(empty.range().start(), 1);
    }
}
