#![no_std]

//! `microprop`: allocation-free typed key-value encoding in client-provided buffers.
//!
//! A [`Store`] appends typed fields (bools, integers, floats, blobs, strings
//! and numeric arrays) to a byte buffer it does not own, and finds them again
//! by name with a linear scan. The format is small enough for microcontroller
//! RAM and tolerant of erased NOR flash, so a settings block can live directly
//! in a flash page and be read in place.
//!
//! This crate is `no_std` compatible and performs no heap allocations.
//!
//! # Wire Format
//!
//! Fields are stored back-to-back from offset 0:
//!
//! ```text
//! [header][length?][name][payload]
//! ```
//!
//! - `header` is `(tag << 4) | name_len`, with names of 1 to 15 bytes
//! - `length` is present only for variable-size kinds and holds the payload
//!   size; for strings it counts the trailing NUL
//! - multi-byte numbers are stored big-endian
//! - a field is at most 252 bytes long
//!
//! An erased flash byte `0xFF` decodes to the [`FieldKind::Error`] tag and ends
//! the scan, as does the reserved tag 0.
//!
//! # Usage
//!
//! ```
//! # use microprop::Store;
//! let mut buffer = [0u8; 64];
//! let mut store = Store::with_buffer(&mut buffer).unwrap();
//!
//! store.append("a", true).unwrap();
//! store.append("id", 200u8).unwrap();
//! store.append_str("s", "hi").unwrap();
//! store.append_array("xs", &[10u16, 20, 30]).unwrap();
//!
//! assert_eq!(&store.as_bytes()[..3], &[0x11, b'a', 0x01]);
//!
//! // Narrow values widen into larger destinations
//! let id: u64 = store.get("id").unwrap();
//! assert_eq!(id, 200);
//!
//! assert_eq!(store.read_str("s").unwrap(), "hi");
//!
//! let mut xs = [0u16; 8];
//! assert_eq!(store.read_array("xs", &mut xs).unwrap(), 6);
//! assert_eq!(&xs[..3], &[10, 20, 30]);
//! ```
//!
//! # Read-Only Buffers
//!
//! A read-only store never writes and scans the whole buffer, stopping at the
//! first erased byte:
//!
//! ```
//! # use microprop::Store;
//! let mut flash = [0xFFu8; 32];
//! {
//!     let mut store = Store::with_buffer(&mut flash).unwrap();
//!     store.append("mode", 3u8).unwrap();
//! }
//!
//! let settings = Store::read_only(&flash).unwrap();
//! assert_eq!(settings.get::<_, u8>("mode").unwrap(), 3);
//! assert_eq!(settings.fields().count(), 1);
//! assert_eq!(settings.used(), 6);
//! ```
//!
//! # Keys
//!
//! Names can be text, byte strings or integers. Integer keys are stored as
//! their big-endian bytes:
//!
//! ```
//! # use microprop::Store;
//! let mut buffer = [0u8; 32];
//! let mut store = Store::with_buffer(&mut buffer).unwrap();
//!
//! store.append(7u16, 1.5f32).unwrap();
//! assert_eq!(store.find(7u16).unwrap().name(), &[0, 7]);
//! assert_eq!(store.get::<_, f64>(&[0u8, 7]).unwrap(), 1.5);
//! ```
//!
//! ## Features
//!
//! - `std`: enables `std` support in `thiserror` and `embedded-io`
//! - `logging`: logs rejected appends and corrupt headers through the `log` facade

mod core;
mod endian;
mod error;
mod field;
pub mod header;
mod io;
mod key;
mod kind;
mod value;

pub use crate::core::{Access, Store};
pub use endian::WireOrder;
pub use error::MicropropError;
pub use field::{Field, FieldIter};
pub use header::{field_size, ERASED_BYTE, MAX_FIELD_SIZE, MAX_NAME_LEN};
pub use key::Key;
pub use kind::{Element, FieldKind, Scalar};
pub use value::{ArrayIter, ArrayView, Value};
