//! Deduplicated string cache.
//!
//! Every string used by the node-graph section of a ccbi stream is stored
//! once, up front, and referenced by index afterwards. The cache is
//! populated exactly once per decode, immediately after the header, and is
//! immutable from then on.

use super::cursor::BitCursor;
use crate::util::{Error, Result};

/// Ordered sequence of decoded strings; indices are stable for the
/// lifetime of one decode.
#[derive(Debug, Default)]
pub struct StringCache {
    strings: Vec<String>,
}

impl StringCache {
    /// Read the string cache section from the stream: a var-uint count
    /// followed by that many length-prefixed strings in index order.
    pub fn read_from(cursor: &mut BitCursor<'_>) -> Result<Self> {
        let count = cursor.read_var_uint()? as usize;

        let mut strings = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            strings.push(cursor.read_utf8()?);
        }

        Ok(Self { strings })
    }

    /// Resolve a cached string by index.
    pub fn resolve(&self, index: usize) -> Result<&str> {
        self.strings
            .get(index)
            .map(String::as_str)
            .ok_or(Error::StringIndexOutOfRange {
                index,
                count: self.strings.len(),
            })
    }

    /// Number of cached strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// True if the cache holds no strings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
