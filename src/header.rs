//! Field header codec.
//!
//! Field layout: `[header][length?][name][payload]`
//!
//! The header byte is `(tag << 4) | name_len`. Variable-size kinds are followed
//! by one length byte holding the payload size (for strings, including the NUL).

use crate::kind::FieldKind;

/// Bits of the header byte that carry the name length.
pub const NAME_BITS: u32 = 4;
const NAME_MASK: u8 = 0xFF >> (8 - NAME_BITS);

/// Longest name the header can encode.
pub const MAX_NAME_LEN: usize = NAME_MASK as usize;

/// Upper bound on the total encoded size of a single field.
pub const MAX_FIELD_SIZE: usize = 252;

/// Value of an erased NOR flash byte. As a header it decodes to [`FieldKind::Error`].
pub const ERASED_BYTE: u8 = 0xFF;

/// Packs a header byte.
///
/// Returns `None` for kinds that are never written and for names that are
/// empty or longer than [`MAX_NAME_LEN`].
#[must_use]
#[allow(clippy::cast_possible_truncation)] // name_len checked against the mask
pub const fn make_header(name_len: usize, kind: FieldKind) -> Option<u8> {
    if !kind.is_storable() || name_len == 0 || name_len > MAX_NAME_LEN {
        return None;
    }
    Some((kind.tag() << NAME_BITS) | name_len as u8)
}

/// Splits a header byte into its kind and name length.
#[must_use]
pub const fn parse_header(header: u8) -> (FieldKind, usize) {
    (
        FieldKind::from_tag(header >> NAME_BITS),
        (header & NAME_MASK) as usize,
    )
}

/// Number of length bytes between the header and the name.
#[must_use]
pub const fn extra_byte_of(kind: FieldKind) -> usize {
    if kind.is_variable() {
        1
    } else {
        0
    }
}

/// Total encoded size of a field, header included.
#[must_use]
pub const fn field_size(name_len: usize, kind: FieldKind, payload_len: usize) -> usize {
    1 + extra_byte_of(kind) + name_len + payload_len
}

/// Total length of the field starting at `bytes[0]`, computed from its header
/// and, for variable-size kinds, its length byte.
///
/// Returns 0 if the header is a reserved or sentinel tag, carries an empty
/// name, or the length byte lies outside `bytes`. The result is not checked
/// against `bytes.len()`.
#[must_use]
pub fn field_length(bytes: &[u8]) -> usize {
    let Some(&header) = bytes.first() else {
        return 0;
    };
    let (kind, name_len) = parse_header(header);
    if !kind.is_storable() || name_len == 0 {
        return 0;
    }
    let payload_len = match kind.fixed_size() {
        Some(size) => size,
        None => match bytes.get(1) {
            Some(&len) => usize::from(len),
            None => return 0,
        },
    };
    field_size(name_len, kind, payload_len)
}
