//! Conversion between host values and the canonical big-endian wire order.

/// A fixed-width number with a canonical on-wire byte order.
///
/// Multi-byte integers and IEEE floats are stored big-endian regardless of the
/// host. Single-byte types pass through untouched.
pub trait WireOrder: Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Reorders the value's bytes so that its native representation is the wire representation.
    #[must_use]
    fn to_wire(self) -> Self;

    /// Inverse of [`WireOrder::to_wire`].
    #[must_use]
    fn from_wire(self) -> Self;

    /// Writes the value in wire order into `out`.
    ///
    /// Writes `min(out.len(), WIDTH)` bytes; callers pass a slice of exactly `WIDTH` bytes.
    fn put(self, out: &mut [u8]);

    /// Reads a value from exactly `WIDTH` wire-order bytes.
    ///
    /// Returns `None` if `bytes` has a different length.
    fn take(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_wire_int {
    ($($t:ty),*) => {$(
        impl WireOrder for $t {
            const WIDTH: usize = core::mem::size_of::<$t>();

            #[inline]
            fn to_wire(self) -> Self {
                self.to_be()
            }

            #[inline]
            fn from_wire(self) -> Self {
                <$t>::from_be(self)
            }

            #[inline]
            fn put(self, out: &mut [u8]) {
                for (dst, src) in out.iter_mut().zip(self.to_wire().to_ne_bytes()) {
                    *dst = src;
                }
            }

            #[inline]
            fn take(bytes: &[u8]) -> Option<Self> {
                bytes
                    .try_into()
                    .ok()
                    .map(<$t>::from_ne_bytes)
                    .map(Self::from_wire)
            }
        }
    )*};
}

macro_rules! impl_wire_float {
    ($($t:ty),*) => {$(
        impl WireOrder for $t {
            const WIDTH: usize = core::mem::size_of::<$t>();

            #[inline]
            fn to_wire(self) -> Self {
                <$t>::from_bits(self.to_bits().to_be())
            }

            #[inline]
            fn from_wire(self) -> Self {
                <$t>::from_bits(self.to_bits().to_be())
            }

            #[inline]
            fn put(self, out: &mut [u8]) {
                for (dst, src) in out.iter_mut().zip(self.to_wire().to_ne_bytes()) {
                    *dst = src;
                }
            }

            #[inline]
            fn take(bytes: &[u8]) -> Option<Self> {
                bytes
                    .try_into()
                    .ok()
                    .map(<$t>::from_ne_bytes)
                    .map(Self::from_wire)
            }
        }
    )*};
}

impl_wire_int!(u8, i8, u16, i16, u32, i32, u64, i64);
impl_wire_float!(f32, f64);

/// Decodes 1 to 8 big-endian bytes as an unsigned integer, zero-extended.
pub(crate) fn load_unsigned(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}
