//! ccbi stream writer.
//!
//! Bit-level encoder producing the exact inverse of the decode primitives.
//! Used to publish streams and to build test fixtures for the reader.

use byteorder::{ByteOrder, LittleEndian};

use super::format::*;
use crate::util::{Error, Result};

/// In-memory writer for ccbi streams.
///
/// Bits are packed LSB-first into the current byte, mirroring
/// [`BitCursor::get_bit`](super::BitCursor::get_bit). Every byte-level write
/// requires an aligned cursor; the var-int writers align themselves the same
/// way the decoder does.
#[derive(Default)]
pub struct StreamWriter {
    buf: Vec<u8>,
    /// Bit offset within the last byte of `buf`; 0 means aligned.
    bit: u8,
}

impl StreamWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align();
        self.buf
    }

    /// Current length in whole bytes (a partial byte counts as one).
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one bit, LSB-first within the current byte.
    pub fn put_bit(&mut self, bit: bool) {
        if self.bit == 0 {
            self.buf.push(0);
        }
        if bit {
            let last = self.buf.len() - 1;
            self.buf[last] |= 1 << self.bit;
        }
        self.bit = (self.bit + 1) % 8;
    }

    /// Pad with zero bits to the next byte boundary. No-op if aligned.
    pub fn align(&mut self) {
        self.bit = 0;
    }

    /// Write one raw byte. Pads to a byte boundary first.
    pub fn write_byte(&mut self, byte: u8) {
        self.align();
        self.buf.push(byte);
    }

    /// Write raw bytes. Pads to a byte boundary first.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align();
        self.buf.extend_from_slice(bytes);
    }

    /// Write a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(value as u8);
    }

    /// Write an unsigned variable-length integer.
    pub fn write_var_uint(&mut self, value: u64) -> Result<()> {
        self.write_var_raw(
            value
                .checked_add(1)
                .ok_or_else(|| Error::invalid("var-uint value out of range"))?,
        );
        Ok(())
    }

    /// Write a signed variable-length integer using the parity sign rule.
    pub fn write_var_int(&mut self, value: i64) -> Result<()> {
        // Inverse of the decoder's mapping: n >= 0 -> 2n+1 (odd),
        // n < 0 -> -2n (even).
        let raw = if value >= 0 {
            (value as u64)
                .checked_mul(2)
                .and_then(|v| v.checked_add(1))
                .ok_or_else(|| Error::invalid("var-int value out of range"))?
        } else {
            value
                .unsigned_abs()
                .checked_mul(2)
                .ok_or_else(|| Error::invalid("var-int value out of range"))?
        };
        self.write_var_raw(raw);
        Ok(())
    }

    /// Write the raw (biased) var-int value: a unary length prefix, the
    /// payload bits MSB-first with the leading one dropped, then padding to
    /// the next byte boundary.
    fn write_var_raw(&mut self, raw: u64) {
        debug_assert!(raw >= 1);
        let num_bits = 63 - raw.leading_zeros();

        for _ in 0..num_bits {
            self.put_bit(false);
        }
        self.put_bit(true);
        for a in (0..num_bits).rev() {
            self.put_bit(raw & (1 << a) != 0);
        }

        self.align();
    }

    /// Write a tagged float, using the compact tags for the common
    /// constants and 4 raw little-endian bytes otherwise.
    pub fn write_float(&mut self, value: f32) {
        if value == 0.0 {
            self.write_byte(FLOAT_TAG_0);
        } else if value == 1.0 {
            self.write_byte(FLOAT_TAG_1);
        } else if value == -1.0 {
            self.write_byte(FLOAT_TAG_MINUS1);
        } else if value == 0.5 {
            self.write_byte(FLOAT_TAG_05);
        } else {
            self.write_byte(FLOAT_TAG_FULL);
            let mut bytes = [0u8; 4];
            LittleEndian::write_f32(&mut bytes, value);
            self.write_bytes(&bytes);
        }
    }

    /// Write a length-prefixed UTF-8 string (raw big-endian u16 length).
    pub fn write_utf8(&mut self, value: &str) -> Result<()> {
        let len = value.len();
        if len > u16::MAX as usize {
            return Err(Error::invalid(format!("string too long: {len} bytes")));
        }
        self.write_byte((len >> 8) as u8);
        self.write_byte(len as u8);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Write the stream header: magic bytes plus format version.
    pub fn write_header(&mut self, version: u64) -> Result<()> {
        self.write_bytes(CCB_MAGIC);
        self.write_var_uint(version)
    }

    /// Write the string cache section: count plus each entry in index order.
    pub fn write_string_cache<S: AsRef<str>>(&mut self, strings: &[S]) -> Result<()> {
        self.write_var_uint(strings.len() as u64)?;
        for s in strings {
            self.write_utf8(s.as_ref())?;
        }
        Ok(())
    }
}
