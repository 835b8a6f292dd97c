use crate::header::{extra_byte_of, field_length, parse_header, MAX_FIELD_SIZE};
use crate::kind::FieldKind;
use crate::value::Value;

/// A validated view of one encoded field inside a store's buffer.
///
/// A `Field` is only created after its whole extent has been checked against
/// the scan bound, so the accessors never index out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    raw: &'a [u8],
    offset: usize,
    kind: FieldKind,
    name_len: usize,
}

impl<'a> Field<'a> {
    /// Parses the field at `offset`, looking no further than `limit`.
    ///
    /// Returns `None` for the erased-flash sentinel, reserved tags, empty
    /// names, lengths above [`MAX_FIELD_SIZE`] and fields crossing `limit`.
    pub(crate) fn parse(buffer: &'a [u8], offset: usize, limit: usize) -> Option<Self> {
        let window = buffer.get(offset..limit.min(buffer.len()))?;
        let total = field_length(window);
        if total == 0 || total > MAX_FIELD_SIZE || total > window.len() {
            #[cfg(feature = "logging")]
            if let Some(&header) = window.first() {
                if header != crate::header::ERASED_BYTE {
                    log::trace!("field walk stopped at offset {offset}, header {header:#04x}");
                }
            }
            return None;
        }
        let (kind, name_len) = parse_header(*window.first()?);
        Some(Self {
            raw: window.get(..total)?,
            offset,
            kind,
            name_len,
        })
    }

    /// Offset of the header byte from the start of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Raw name bytes, without any terminator.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // Extent validated in `parse`
    pub fn name(&self) -> &'a [u8] {
        let start = self.name_start();
        &self.raw[start..start + self.name_len]
    }

    /// Payload bytes in wire order. For strings this includes the trailing NUL.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // Extent validated in `parse`
    pub fn data(&self) -> &'a [u8] {
        &self.raw[self.name_start() + self.name_len..]
    }

    /// Payload size in bytes. For strings this includes the trailing NUL.
    #[must_use]
    pub fn data_size(&self) -> usize {
        self.raw.len() - self.name_start() - self.name_len
    }

    /// Encoded size of the whole field.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.raw.len()
    }

    /// The encoded field, header included.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    /// Offset just past this field, where the next one would start.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.raw.len()
    }

    /// Decodes the payload according to the stored kind.
    #[must_use]
    pub fn value(&self) -> Option<Value<'a>> {
        Value::decode(self.kind, self.data())
    }

    fn name_start(&self) -> usize {
        1 + extra_byte_of(self.kind)
    }

    pub(crate) fn has_name(&self, name: &[u8]) -> bool {
        self.name_len == name.len() && self.name() == name
    }
}

/// Iterator over the fields of a `Store`, in append order.
///
/// Stops at the first sentinel, reserved or malformed header, or at the scan bound.
///
/// This iterator implements `Clone`.
#[derive(Clone)]
pub struct FieldIter<'a> {
    buffer: &'a [u8],
    offset: usize,
    limit: usize,
}

impl<'a> FieldIter<'a> {
    pub(crate) fn new(buffer: &'a [u8], limit: usize) -> Self {
        Self {
            buffer,
            offset: 0,
            limit,
        }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let field = Field::parse(self.buffer, self.offset, self.limit);
        match field {
            Some(field) => self.offset = field.end(),
            None => self.offset = self.limit,
        }
        field
    }
}

impl core::iter::FusedIterator for FieldIter<'_> {}
