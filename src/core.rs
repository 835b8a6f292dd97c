use crate::error::MicropropError;
use crate::field::{Field, FieldIter};
use crate::header::{extra_byte_of, field_size, make_header, MAX_FIELD_SIZE, MAX_NAME_LEN};
use crate::key::Key;
use crate::kind::{Element, FieldKind, Scalar};
use crate::value::string_content;

/// Access mode of a bound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// New fields may be appended.
    ReadWrite,
    /// The buffer is never written. Fields are found by scanning the whole
    /// buffer up to the first erased or malformed header.
    ReadOnly,
}

#[derive(Debug)]
enum Binding<'a> {
    Unbound,
    ReadWrite(&'a mut [u8]),
    ReadOnly(&'a [u8]),
}

/// A typed key-value store over a client-provided buffer.
///
/// Fields are appended back-to-back from offset 0 and never rewritten. The
/// store never allocates and never owns the buffer.
#[derive(Debug)]
pub struct Store<'a> {
    binding: Binding<'a>,
    used: usize,
}

impl Default for Store<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Store<'a> {
    /// Creates a store without a buffer. Every operation fails until a buffer is assigned.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            binding: Binding::Unbound,
            used: 0,
        }
    }

    /// Creates an empty read-write store. Existing buffer content is ignored
    /// and will be overwritten by appends.
    ///
    /// # Errors
    ///
    /// Returns `MicropropError::ZeroSizeBuffer` if the buffer is empty.
    pub fn with_buffer(buffer: &'a mut [u8]) -> Result<Self, MicropropError> {
        let mut store = Self::new();
        store.assign_buffer(buffer, Access::ReadWrite)?;
        Ok(store)
    }

    /// Creates a read-only store over encoded data, for example a settings
    /// block in program flash.
    ///
    /// # Errors
    ///
    /// Returns `MicropropError::ZeroSizeBuffer` if the buffer is empty.
    pub fn read_only(buffer: &'a [u8]) -> Result<Self, MicropropError> {
        let mut store = Self::new();
        store.assign_read_only(buffer)?;
        Ok(store)
    }

    /// Creates a read-write store that keeps the fields already present in
    /// `buffer`. New fields are appended after the last valid one.
    ///
    /// # Errors
    ///
    /// Returns `MicropropError::ZeroSizeBuffer` if the buffer is empty.
    pub fn open(buffer: &'a mut [u8]) -> Result<Self, MicropropError> {
        let mut store = Self::with_buffer(buffer)?;
        store.used = recover_used(store.bytes());
        Ok(store)
    }

    /// Binds the store to `buffer`, replacing any previous binding.
    ///
    /// In read-write mode the store starts empty. In read-only mode the used
    /// size is derived from the existing fields.
    ///
    /// # Errors
    ///
    /// Returns `MicropropError::ZeroSizeBuffer` if the buffer is empty. The
    /// store is left unbound in that case.
    pub fn assign_buffer(&mut self, buffer: &'a mut [u8], access: Access) -> Result<(), MicropropError> {
        match access {
            Access::ReadWrite => {
                if buffer.is_empty() {
                    self.unbind();
                    return Err(MicropropError::ZeroSizeBuffer);
                }
                self.binding = Binding::ReadWrite(buffer);
                self.used = 0;
                Ok(())
            }
            Access::ReadOnly => self.assign_read_only(buffer),
        }
    }

    /// Binds the store to `buffer` in read-only mode.
    ///
    /// # Errors
    ///
    /// Returns `MicropropError::ZeroSizeBuffer` if the buffer is empty. The
    /// store is left unbound in that case.
    pub fn assign_read_only(&mut self, buffer: &'a [u8]) -> Result<(), MicropropError> {
        if buffer.is_empty() {
            self.unbind();
            return Err(MicropropError::ZeroSizeBuffer);
        }
        self.used = recover_used(buffer);
        self.binding = Binding::ReadOnly(buffer);
        Ok(())
    }

    fn unbind(&mut self) {
        self.binding = Binding::Unbound;
        self.used = 0;
    }

    /// Discards all fields. The buffer bytes are left untouched.
    ///
    /// On a read-only store the fields stay hidden until the buffer is bound again.
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Bytes committed so far.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Size of the bound buffer, 0 when unbound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes().len()
    }

    /// Bytes still available for appends.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.used)
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !matches!(self.binding, Binding::Unbound)
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self.binding, Binding::ReadOnly(_))
    }

    /// The committed part of the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        let bytes = self.bytes();
        bytes.get(..self.used).unwrap_or(bytes)
    }

    fn bytes(&self) -> &[u8] {
        match &self.binding {
            Binding::Unbound => &[],
            Binding::ReadWrite(buffer) => buffer,
            Binding::ReadOnly(buffer) => buffer,
        }
    }

    /// Read-only stores derive `used` from a walk over the whole buffer at
    /// bind time, so `used` is the scan bound in both modes.
    fn scan_limit(&self) -> usize {
        self.used
    }

    /// Returns the first field, if any.
    #[must_use]
    pub fn first_field(&self) -> Option<Field<'_>> {
        Field::parse(self.bytes(), 0, self.scan_limit())
    }

    /// Returns the field stored after `field`.
    ///
    /// Returns `None` at the end of data, at an erased or reserved header, or
    /// when the next field is malformed or runs past the scan bound.
    #[must_use]
    pub fn field_next(&self, field: &Field<'_>) -> Option<Field<'_>> {
        Field::parse(self.bytes(), field.end(), self.scan_limit())
    }

    /// Returns an iterator over the stored fields in append order.
    #[must_use]
    pub fn fields(&self) -> FieldIter<'_> {
        self.into_iter()
    }

    /// Finds the first field with the given name. The search always starts
    /// at the beginning of the buffer.
    #[must_use]
    pub fn find<K: Key>(&self, name: K) -> Option<Field<'_>> {
        name.with_name(|name| {
            if name.is_empty() || name.len() > MAX_NAME_LEN {
                return None;
            }
            self.fields().find(|field| field.has_name(name))
        })
    }

    #[must_use]
    pub fn contains<K: Key>(&self, name: K) -> bool {
        self.find(name).is_some()
    }

    fn lookup<K: Key>(&self, name: K) -> Result<Field<'_>, MicropropError> {
        if !self.is_bound() {
            return Err(MicropropError::Unbound);
        }
        self.find(name).ok_or(MicropropError::NotFound)
    }

    /// Appends a scalar field.
    ///
    /// # Errors
    ///
    /// - `MicropropError::Unbound` or `MicropropError::ReadOnly` if the store cannot be written
    /// - `MicropropError::InvalidName` if the name is empty or longer than 15 bytes
    /// - `MicropropError::FieldSizeExceeded` or `MicropropError::CapacityExceeded` if it does not fit
    ///
    /// On error the buffer and the used size are unchanged.
    pub fn append<K: Key, T: Scalar>(&mut self, name: K, value: T) -> Result<(), MicropropError> {
        let size = T::KIND.fixed_size().ok_or(MicropropError::EmptyValue)?;
        name.with_name(|name| self.append_field(name, T::KIND, size, |out| value.encode(out)))
    }

    /// Appends a raw byte field.
    ///
    /// # Errors
    ///
    /// As [`Store::append`], plus `MicropropError::EmptyValue` for an empty blob.
    pub fn append_blob<K: Key>(&mut self, name: K, data: &[u8]) -> Result<(), MicropropError> {
        name.with_name(|name| {
            self.append_field(name, FieldKind::Blob, data.len(), |out| {
                out.copy_from_slice(data);
            })
        })
    }

    /// Appends a string field. The stored payload is the string bytes followed
    /// by a NUL, so it can be handed to C code without copying.
    ///
    /// # Errors
    ///
    /// As [`Store::append`].
    pub fn append_str<K: Key>(&mut self, name: K, value: &str) -> Result<(), MicropropError> {
        let bytes = value.as_bytes();
        name.with_name(|name| {
            self.append_field(name, FieldKind::String, bytes.len() + 1, |out| {
                let (content, nul) = out.split_at_mut(bytes.len());
                content.copy_from_slice(bytes);
                nul.fill(0);
            })
        })
    }

    /// Appends a one-dimensional numeric array. `u8`/`i8` arrays are stored as blobs.
    ///
    /// # Errors
    ///
    /// As [`Store::append`], plus `MicropropError::EmptyValue` for an empty slice.
    pub fn append_array<K: Key, T: Element>(&mut self, name: K, values: &[T]) -> Result<(), MicropropError> {
        name.with_name(|name| {
            self.append_field(name, T::ARRAY_KIND, values.len() * T::WIDTH, |out| {
                for (chunk, value) in out.chunks_exact_mut(T::WIDTH).zip(values) {
                    value.put(chunk);
                }
            })
        })
    }

    /// Validates and writes one field. Nothing is written unless the whole
    /// field fits; `used` moves only after the last byte is in place.
    #[allow(
        clippy::expect_used,
        clippy::indexing_slicing,
        clippy::cast_possible_truncation
    )]
    fn append_field(
        &mut self,
        name: &[u8],
        kind: FieldKind,
        payload_len: usize,
        fill: impl FnOnce(&mut [u8]),
    ) -> Result<(), MicropropError> {
        let used = self.used;
        let buffer = match &mut self.binding {
            Binding::Unbound => return Err(rejected(MicropropError::Unbound)),
            Binding::ReadOnly(_) => return Err(rejected(MicropropError::ReadOnly)),
            Binding::ReadWrite(buffer) => buffer,
        };

        if payload_len == 0 {
            return Err(rejected(MicropropError::EmptyValue));
        }
        let header = make_header(name.len(), kind).ok_or_else(|| {
            rejected(MicropropError::InvalidName { length: name.len() })
        })?;

        let total = field_size(name.len(), kind, payload_len);
        if total > MAX_FIELD_SIZE {
            return Err(rejected(MicropropError::FieldSizeExceeded {
                size: total,
                max: MAX_FIELD_SIZE,
            }));
        }
        let available = buffer.len().saturating_sub(used);
        if total > available {
            return Err(rejected(MicropropError::CapacityExceeded {
                requested: total,
                available,
            }));
        }

        let field = buffer
            .get_mut(used..used + total)
            .expect("Buffer capacity checked above");
        let (prefix, rest) = field.split_at_mut(1 + extra_byte_of(kind));
        let (name_out, payload) = rest.split_at_mut(name.len());
        prefix[0] = header;
        if let Some(length) = prefix.get_mut(1) {
            // payload_len < MAX_FIELD_SIZE
            *length = payload_len as u8;
        }
        name_out.copy_from_slice(name);
        fill(payload);

        self.used = used + total;
        Ok(())
    }

    /// Reads a scalar field into `dest`, widening narrower stored values.
    ///
    /// Returns the stored payload width in bytes.
    ///
    /// # Errors
    ///
    /// - `MicropropError::NotFound` if no field has this name
    /// - `MicropropError::TypeMismatch` if the field is not a compatible scalar
    /// - `MicropropError::DestinationTooSmall` if the stored value is wider than `T`
    ///
    /// `dest` is left unchanged on error.
    pub fn read<K: Key, T: Scalar>(&self, name: K, dest: &mut T) -> Result<usize, MicropropError> {
        let field = self.lookup(name)?;
        if !field.kind().is_scalar() {
            return Err(MicropropError::TypeMismatch {
                stored: field.kind(),
                requested: T::KIND,
            });
        }
        *dest = T::decode(field.kind(), field.data())?;
        Ok(field.data_size())
    }

    /// Reads a scalar field by value. See [`Store::read`].
    ///
    /// # Errors
    ///
    /// As [`Store::read`].
    pub fn get<K: Key, T: Scalar>(&self, name: K) -> Result<T, MicropropError> {
        let field = self.lookup(name)?;
        if !field.kind().is_scalar() {
            return Err(MicropropError::TypeMismatch {
                stored: field.kind(),
                requested: T::KIND,
            });
        }
        T::decode(field.kind(), field.data())
    }

    /// Reads an array field into `dest`. The stored element type must match
    /// `T` exactly. Copies up to `dest.len()` elements.
    ///
    /// Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// - `MicropropError::NotFound` if no field has this name
    /// - `MicropropError::TypeMismatch` if the stored kind is not `T::ARRAY_KIND`
    pub fn read_array<K: Key, T: Element>(&self, name: K, dest: &mut [T]) -> Result<usize, MicropropError> {
        let field = self.lookup(name)?;
        if field.kind() != T::ARRAY_KIND {
            return Err(MicropropError::TypeMismatch {
                stored: field.kind(),
                requested: T::ARRAY_KIND,
            });
        }
        let mut copied = 0;
        for (slot, chunk) in dest.iter_mut().zip(field.data().chunks_exact(T::WIDTH)) {
            if let Some(value) = T::take(chunk) {
                *slot = value;
                copied += T::WIDTH;
            }
        }
        Ok(copied)
    }

    /// Copies a blob field into `dest`.
    ///
    /// Returns the blob size.
    ///
    /// # Errors
    ///
    /// - `MicropropError::NotFound` if no field has this name
    /// - `MicropropError::TypeMismatch` if the field is not a blob
    /// - `MicropropError::DestinationTooSmall` if `dest` is shorter than the blob
    pub fn read_blob<K: Key>(&self, name: K, dest: &mut [u8]) -> Result<usize, MicropropError> {
        let field = self.lookup(name)?;
        if field.kind() != FieldKind::Blob {
            return Err(MicropropError::TypeMismatch {
                stored: field.kind(),
                requested: FieldKind::Blob,
            });
        }
        let data = field.data();
        let provided = dest.len();
        let target = dest
            .get_mut(..data.len())
            .ok_or(MicropropError::DestinationTooSmall {
                required: data.len(),
                provided,
            })?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    /// Copies a string field into `dest`, NUL-terminated.
    ///
    /// Returns the string length without the NUL.
    ///
    /// # Errors
    ///
    /// - `MicropropError::NotFound` if no field has this name
    /// - `MicropropError::TypeMismatch` if the field is not a string
    /// - `MicropropError::DestinationTooSmall` if `dest` cannot hold the string and its NUL
    pub fn read_string<K: Key>(&self, name: K, dest: &mut [u8]) -> Result<usize, MicropropError> {
        let field = self.lookup(name)?;
        if field.kind() != FieldKind::String {
            return Err(MicropropError::TypeMismatch {
                stored: field.kind(),
                requested: FieldKind::String,
            });
        }
        let content = match field.data().split_last() {
            Some((_, content)) => content,
            None => &[],
        };
        let provided = dest.len();
        let (target, nul) = dest
            .get_mut(..=content.len())
            .map(|slot| slot.split_at_mut(content.len()))
            .ok_or(MicropropError::DestinationTooSmall {
                required: content.len() + 1,
                provided,
            })?;
        target.copy_from_slice(content);
        nul.fill(0);
        Ok(content.len())
    }

    /// Borrows a string field from the buffer, without the trailing NUL.
    ///
    /// # Errors
    ///
    /// - `MicropropError::NotFound` if no field has this name
    /// - `MicropropError::TypeMismatch` if the field is not a string
    /// - `MicropropError::InvalidUtf8` if the stored bytes are not UTF-8
    pub fn read_str<K: Key>(&self, name: K) -> Result<&str, MicropropError> {
        let field = self.lookup(name)?;
        if field.kind() != FieldKind::String {
            return Err(MicropropError::TypeMismatch {
                stored: field.kind(),
                requested: FieldKind::String,
            });
        }
        string_content(field.data()).map_err(|_| MicropropError::InvalidUtf8)
    }
}

impl<'s> IntoIterator for &'s Store<'_> {
    type Item = Field<'s>;
    type IntoIter = FieldIter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        FieldIter::new(self.bytes(), self.scan_limit())
    }
}

/// Offset just past the last valid field when scanning the whole buffer.
fn recover_used(buffer: &[u8]) -> usize {
    FieldIter::new(buffer, buffer.len())
        .last()
        .map_or(0, |field| field.end())
}

fn rejected(error: MicropropError) -> MicropropError {
    #[cfg(feature = "logging")]
    log::debug!("append rejected: {error}");
    error
}
