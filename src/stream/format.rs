//! ccbi format constants.

/// Magic bytes at the start of a ccbi stream.
///
/// The original reader compared the first four bytes against the `'ccbi'`
/// four-character code as a native (little-endian) integer, so the bytes on
/// disk read `ibcc`.
pub const CCB_MAGIC: &[u8; 4] = b"ibcc";

/// Format version this reader supports. A file with any other version is
/// rejected with a logged warning.
pub const CCB_VERSION: u64 = 2;

/// Float tag: the value 0.0, no payload.
pub const FLOAT_TAG_0: u8 = 0;
/// Float tag: the value 1.0, no payload.
pub const FLOAT_TAG_1: u8 = 1;
/// Float tag: the value -1.0, no payload.
pub const FLOAT_TAG_MINUS1: u8 = 2;
/// Float tag: the value 0.5, no payload.
pub const FLOAT_TAG_05: u8 = 3;
/// Float tag: payload is a variable-length signed integer.
pub const FLOAT_TAG_INT: u8 = 4;
/// Float tag: payload is 4 raw little-endian IEEE-754 bytes.
///
/// The decoder treats every tag other than the ones above as a full float;
/// this is the value the writer emits.
pub const FLOAT_TAG_FULL: u8 = 5;

/// Binding target: node is not bound to any member variable.
pub const TARGET_NONE: u64 = 0;
/// Binding target: the document root node.
pub const TARGET_DOCUMENT_ROOT: u64 = 1;
/// Binding target: the caller-supplied owner object.
pub const TARGET_OWNER: u64 = 2;

/// Default recursion limit for the node graph. The format itself has no
/// structural depth bound, so the decoder enforces one.
pub const DEFAULT_MAX_DEPTH: usize = 256;
