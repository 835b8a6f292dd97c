use crate::endian::{load_unsigned, WireOrder};
use crate::error::MicropropError;

/// Field data types, stored in the upper four bits of the header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldKind {
    /// Reserved for field editing. Never written; terminates iteration.
    Removed = 0,
    Bool = 1,
    Byte = 2,
    Word = 3,
    DWord = 4,
    DDWord = 5,
    Float = 6,
    Double = 7,
    /// Raw bytes, also used for `u8`/`i8` arrays
    Blob = 8,
    /// UTF-8 text followed by a NUL byte
    String = 9,
    Array16 = 10,
    Array32 = 11,
    Array64 = 12,
    ArrayFloat = 13,
    ArrayDouble = 14,
    /// Never written. An erased flash byte (`0xFF`) decodes to this tag.
    Error = 15,
}

impl FieldKind {
    /// Maps a 4-bit tag to its kind. Bits above the low nibble are ignored.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag & 0x0F {
            0 => Self::Removed,
            1 => Self::Bool,
            2 => Self::Byte,
            3 => Self::Word,
            4 => Self::DWord,
            5 => Self::DDWord,
            6 => Self::Float,
            7 => Self::Double,
            8 => Self::Blob,
            9 => Self::String,
            10 => Self::Array16,
            11 => Self::Array32,
            12 => Self::Array64,
            13 => Self::ArrayFloat,
            14 => Self::ArrayDouble,
            _ => Self::Error,
        }
    }

    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Whether fields of this kind may appear in a buffer.
    #[must_use]
    pub const fn is_storable(self) -> bool {
        !matches!(self, Self::Removed | Self::Error)
    }

    /// Fixed-size kinds have no length byte.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        self.is_storable() && self.tag() >> 3 == 0
    }

    /// Variable-size kinds carry a length byte after the header.
    #[must_use]
    pub const fn is_variable(self) -> bool {
        self.is_storable() && self.tag() >> 3 == 1
    }

    /// Payload size of a fixed-size kind, `None` for every other kind.
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Byte => Some(1),
            Self::Word => Some(2),
            Self::DWord | Self::Float => Some(4),
            Self::DDWord | Self::Double => Some(8),
            _ => None,
        }
    }

    /// Width of one element of a variable-size kind. Blob and String count bytes.
    #[must_use]
    pub const fn element_size(self) -> Option<usize> {
        match self {
            Self::Blob | Self::String => Some(1),
            Self::Array16 => Some(2),
            Self::Array32 | Self::ArrayFloat => Some(4),
            Self::Array64 | Self::ArrayDouble => Some(8),
            _ => None,
        }
    }

    const fn integer_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Byte | Self::Word | Self::DWord | Self::DDWord => self.fixed_size(),
            _ => None,
        }
    }
}

/// A single fixed-size value: `bool`, 8 to 64-bit integers, `f32` and `f64`.
///
/// Decoding is widening: a value is accepted from any stored kind of the same
/// family whose width fits the destination.
pub trait Scalar: Copy {
    /// Kind written by [`Scalar::encode`].
    const KIND: FieldKind;

    /// Writes the value in wire order. `out` is exactly `KIND.fixed_size()` bytes.
    fn encode(self, out: &mut [u8]);

    /// Decodes a stored payload of kind `stored` into `Self`.
    ///
    /// # Errors
    ///
    /// - `MicropropError::TypeMismatch` if `stored` belongs to another family
    /// - `MicropropError::DestinationTooSmall` if the stored width exceeds `Self`
    fn decode(stored: FieldKind, payload: &[u8]) -> Result<Self, MicropropError>;
}

fn check_width(stored: usize, provided: usize) -> Result<(), MicropropError> {
    if stored > provided {
        return Err(MicropropError::DestinationTooSmall {
            required: stored,
            provided,
        });
    }
    Ok(())
}

macro_rules! impl_scalar_int {
    ($($t:ty => $kind:ident),*) => {$(
        impl Scalar for $t {
            const KIND: FieldKind = FieldKind::$kind;

            fn encode(self, out: &mut [u8]) {
                self.put(out);
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn decode(stored: FieldKind, payload: &[u8]) -> Result<Self, MicropropError> {
                let width = stored.integer_width().ok_or(MicropropError::TypeMismatch {
                    stored,
                    requested: Self::KIND,
                })?;
                check_width(width, <$t as WireOrder>::WIDTH)?;
                Ok(load_unsigned(payload) as $t)
            }
        }
    )*};
}

impl_scalar_int!(
    u8 => Byte, i8 => Byte,
    u16 => Word, i16 => Word,
    u32 => DWord, i32 => DWord,
    u64 => DDWord, i64 => DDWord
);

impl Scalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn encode(self, out: &mut [u8]) {
        u8::from(self).put(out);
    }

    fn decode(stored: FieldKind, payload: &[u8]) -> Result<Self, MicropropError> {
        match stored {
            FieldKind::Bool | FieldKind::Byte => Ok(load_unsigned(payload) != 0),
            FieldKind::Word | FieldKind::DWord | FieldKind::DDWord => {
                Err(MicropropError::DestinationTooSmall {
                    required: payload.len(),
                    provided: 1,
                })
            }
            _ => Err(MicropropError::TypeMismatch {
                stored,
                requested: Self::KIND,
            }),
        }
    }
}

impl Scalar for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn encode(self, out: &mut [u8]) {
        self.put(out);
    }

    fn decode(stored: FieldKind, payload: &[u8]) -> Result<Self, MicropropError> {
        match stored {
            FieldKind::Float => f32::take(payload).ok_or(MicropropError::DestinationTooSmall {
                required: payload.len(),
                provided: 4,
            }),
            FieldKind::Double => Err(MicropropError::DestinationTooSmall {
                required: 8,
                provided: 4,
            }),
            _ => Err(MicropropError::TypeMismatch {
                stored,
                requested: Self::KIND,
            }),
        }
    }
}

impl Scalar for f64 {
    const KIND: FieldKind = FieldKind::Double;

    fn encode(self, out: &mut [u8]) {
        self.put(out);
    }

    fn decode(stored: FieldKind, payload: &[u8]) -> Result<Self, MicropropError> {
        let value = match stored {
            FieldKind::Float => f32::take(payload).map(f64::from),
            FieldKind::Double => f64::take(payload),
            _ => {
                return Err(MicropropError::TypeMismatch {
                    stored,
                    requested: Self::KIND,
                })
            }
        };
        value.ok_or(MicropropError::DestinationTooSmall {
            required: payload.len(),
            provided: 8,
        })
    }
}

/// Element type of a one-dimensional numeric array.
///
/// Byte-sized elements map to [`FieldKind::Blob`]. Array reads require the
/// stored kind to match `ARRAY_KIND` exactly.
pub trait Element: WireOrder {
    const ARRAY_KIND: FieldKind;
}

macro_rules! impl_element {
    ($($t:ty => $kind:ident),*) => {$(
        impl Element for $t {
            const ARRAY_KIND: FieldKind = FieldKind::$kind;
        }
    )*};
}

impl_element!(
    u8 => Blob, i8 => Blob,
    u16 => Array16, i16 => Array16,
    u32 => Array32, i32 => Array32,
    u64 => Array64, i64 => Array64,
    f32 => ArrayFloat,
    f64 => ArrayDouble
);
