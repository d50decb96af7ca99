//! Low-level ccbi stream layer.
//!
//! The wire format is bit-packed: integers use a unary-prefixed
//! variable-length encoding read LSB-first within each byte, floats use a
//! one-byte tag, and strings are stored once in a cache at the start of the
//! stream and referenced by index afterwards.

pub mod format;

mod cursor;
mod decode;
mod encode;
mod string_cache;

pub use cursor::BitCursor;
pub use encode::StreamWriter;
pub use string_cache::StringCache;
