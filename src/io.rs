//! Moving encoded stores through `embedded-io` readers and writers.

use embedded_io::{Error as _, Read, Write};

use crate::core::Store;
use crate::error::MicropropError;
use crate::header::ERASED_BYTE;

impl<'a> Store<'a> {
    /// Writes the committed bytes to `writer` and flushes it.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `MicropropError::Io` with the writer's error kind.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize, MicropropError> {
        let bytes = self.as_bytes();
        writer
            .write_all(bytes)
            .map_err(|e| MicropropError::Io(e.kind()))?;
        writer.flush().map_err(|e| MicropropError::Io(e.kind()))?;
        Ok(bytes.len())
    }

    /// Fills `buffer` from `reader` until the buffer is full or the reader is
    /// exhausted, then opens it as a read-write store.
    ///
    /// The unread tail of the buffer is set to the erased-flash pattern, so
    /// stale bytes are never taken for fields.
    ///
    /// # Errors
    ///
    /// - `MicropropError::ZeroSizeBuffer` if the buffer is empty
    /// - `MicropropError::Io` with the reader's error kind
    pub fn load_from<R: Read>(buffer: &'a mut [u8], reader: &mut R) -> Result<Self, MicropropError> {
        if buffer.is_empty() {
            return Err(MicropropError::ZeroSizeBuffer);
        }
        let mut filled = 0;
        while let Some(rest) = buffer.get_mut(filled..).filter(|rest| !rest.is_empty()) {
            let n = reader.read(rest).map_err(|e| MicropropError::Io(e.kind()))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if let Some(tail) = buffer.get_mut(filled..) {
            tail.fill(ERASED_BYTE);
        }
        Self::open(buffer)
    }
}
