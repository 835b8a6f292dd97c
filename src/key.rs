/// Something that can name a field.
///
/// Text and byte-string keys are used as-is. Integer keys are stored as their
/// big-endian bytes, so `7u16` names a field with the 2-byte name `[0, 7]`.
pub trait Key {
    /// Calls `f` with the raw name bytes.
    fn with_name<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R;
}

impl Key for &str {
    fn with_name<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.as_bytes())
    }
}

impl Key for &[u8] {
    fn with_name<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl<const N: usize> Key for &[u8; N] {
    fn with_name<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self[..])
    }
}

macro_rules! impl_int_key {
    ($($t:ty),*) => {$(
        impl Key for $t {
            fn with_name<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
                f(&self.to_be_bytes())
            }
        }
    )*};
}

impl_int_key!(u8, i8, u16, i16, u32, i32, u64, i64);
