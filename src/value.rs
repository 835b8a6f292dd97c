use core::marker::PhantomData;

use crate::kind::{Element, FieldKind, Scalar};

/// A decoded field payload.
///
/// Scalars are returned by value. Blobs, strings and arrays borrow the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Byte(u8),
    Word(u16),
    DWord(u32),
    DDWord(u64),
    Float(f32),
    Double(f64),
    Blob(&'a [u8]),
    /// String content without the trailing NUL
    String(&'a str),
    Array(ArrayView<'a>),
}

impl<'a> Value<'a> {
    pub(crate) fn decode(kind: FieldKind, payload: &'a [u8]) -> Option<Self> {
        let value = match kind {
            FieldKind::Bool => Value::Bool(bool::decode(kind, payload).ok()?),
            FieldKind::Byte => Value::Byte(u8::decode(kind, payload).ok()?),
            FieldKind::Word => Value::Word(u16::decode(kind, payload).ok()?),
            FieldKind::DWord => Value::DWord(u32::decode(kind, payload).ok()?),
            FieldKind::DDWord => Value::DDWord(u64::decode(kind, payload).ok()?),
            FieldKind::Float => Value::Float(f32::decode(kind, payload).ok()?),
            FieldKind::Double => Value::Double(f64::decode(kind, payload).ok()?),
            FieldKind::Blob => Value::Blob(payload),
            FieldKind::String => Value::String(string_content(payload).ok()?),
            FieldKind::Array16
            | FieldKind::Array32
            | FieldKind::Array64
            | FieldKind::ArrayFloat
            | FieldKind::ArrayDouble => Value::Array(ArrayView::new(kind, payload)?),
            FieldKind::Removed | FieldKind::Error => return None,
        };
        Some(value)
    }

    /// Kind this value was decoded from.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Bool,
            Value::Byte(_) => FieldKind::Byte,
            Value::Word(_) => FieldKind::Word,
            Value::DWord(_) => FieldKind::DWord,
            Value::DDWord(_) => FieldKind::DDWord,
            Value::Float(_) => FieldKind::Float,
            Value::Double(_) => FieldKind::Double,
            Value::Blob(_) => FieldKind::Blob,
            Value::String(_) => FieldKind::String,
            Value::Array(view) => view.kind(),
        }
    }
}

/// Strips the trailing NUL of a string payload and validates UTF-8.
pub(crate) fn string_content(payload: &[u8]) -> Result<&str, core::str::Utf8Error> {
    let content = match payload.split_last() {
        Some((_, content)) => content,
        None => payload,
    };
    core::str::from_utf8(content)
}

/// A borrowed numeric array in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayView<'a> {
    kind: FieldKind,
    raw: &'a [u8],
}

impl<'a> ArrayView<'a> {
    fn new(kind: FieldKind, raw: &'a [u8]) -> Option<Self> {
        let width = kind.element_size()?;
        if raw.len() % width != 0 {
            return None;
        }
        Some(Self { kind, raw })
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kind
            .element_size()
            .map_or(0, |width| self.raw.len() / width)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Iterates the elements as `T`, or returns `None` if `T` is not the stored element type.
    #[must_use]
    pub fn iter<T: Element>(&self) -> Option<ArrayIter<'a, T>> {
        if T::ARRAY_KIND != self.kind {
            return None;
        }
        Some(ArrayIter {
            chunks: self.raw.chunks_exact(T::WIDTH),
            _phantom: PhantomData,
        })
    }
}

/// Iterator over the elements of an [`ArrayView`], converted from wire order.
#[derive(Clone)]
pub struct ArrayIter<'a, T> {
    chunks: core::slice::ChunksExact<'a, u8>,
    _phantom: PhantomData<T>,
}

impl<T: Element> Iterator for ArrayIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        T::take(self.chunks.next()?)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<T: Element> ExactSizeIterator for ArrayIter<'_, T> {}
