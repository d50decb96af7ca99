//! Bit-level cursor over an in-memory byte buffer.

use crate::util::{Error, Result};

/// Read cursor over a borrowed byte buffer with bit granularity.
///
/// Tracks a byte offset plus a bit offset (0..8) within the current byte.
/// Bits are read LSB-first. Byte-aligned reads discard any pending bit
/// offset; in a well-formed stream every bit-packed integer realigns the
/// cursor itself, so this only matters for corrupt input.
pub struct BitCursor<'a> {
    buf: &'a [u8],
    byte: usize,
    bit: u8,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the start of the buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, byte: 0, bit: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.byte
    }

    /// Current bit offset within the current byte (0..8).
    #[inline]
    pub fn bit_position(&self) -> u8 {
        self.bit
    }

    /// Number of bytes left from the current byte offset.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.byte)
    }

    /// Read one byte and advance the byte offset.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.bit = 0;
        let b = *self
            .buf
            .get(self.byte)
            .ok_or(Error::UnexpectedEof(self.byte))?;
        self.byte += 1;
        Ok(b)
    }

    /// Read `len` raw bytes and advance the byte offset.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.bit = 0;
        let end = self
            .byte
            .checked_add(len)
            .ok_or(Error::UnexpectedEof(self.byte))?;
        if end > self.buf.len() {
            return Err(Error::UnexpectedEof(self.buf.len()));
        }
        let slice = &self.buf[self.byte..end];
        self.byte = end;
        Ok(slice)
    }

    /// Read the next bit, LSB-first within the current byte.
    ///
    /// Advances to the next byte once all 8 bits have been consumed.
    pub fn get_bit(&mut self) -> Result<bool> {
        let byte = *self
            .buf
            .get(self.byte)
            .ok_or(Error::UnexpectedEof(self.byte))?;
        let bit = byte & (1 << self.bit) != 0;

        self.bit += 1;
        if self.bit >= 8 {
            self.bit = 0;
            self.byte += 1;
        }

        Ok(bit)
    }

    /// Discard the remainder of the current byte if any bits were consumed.
    pub fn align(&mut self) {
        if self.bit != 0 {
            self.bit = 0;
            self.byte += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_byte_advances() {
        let mut c = BitCursor::new(&[0x10, 0x20]);
        assert_eq!(c.read_byte().unwrap(), 0x10);
        assert_eq!(c.read_byte().unwrap(), 0x20);
        assert!(matches!(c.read_byte(), Err(Error::UnexpectedEof(2))));
    }

    #[test]
    fn test_get_bit_lsb_first() {
        // 0b0000_0101: bits come out 1, 0, 1, 0, ...
        let mut c = BitCursor::new(&[0x05]);
        assert!(c.get_bit().unwrap());
        assert!(!c.get_bit().unwrap());
        assert!(c.get_bit().unwrap());
        for _ in 3..8 {
            assert!(!c.get_bit().unwrap());
        }
        // all 8 bits consumed, cursor moved to the next byte
        assert_eq!(c.position(), 1);
        assert_eq!(c.bit_position(), 0);
        assert!(c.get_bit().is_err());
    }

    #[test]
    fn test_align_discards_partial_byte() {
        let mut c = BitCursor::new(&[0xFF, 0xAB]);
        c.get_bit().unwrap();
        c.get_bit().unwrap();
        c.align();
        assert_eq!(c.position(), 1);
        assert_eq!(c.read_byte().unwrap(), 0xAB);
    }

    #[test]
    fn test_align_is_noop_when_aligned() {
        let mut c = BitCursor::new(&[0x01]);
        c.align();
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_read_bytes_bounds() {
        let mut c = BitCursor::new(&[1, 2, 3]);
        assert_eq!(c.read_bytes(2).unwrap(), &[1, 2]);
        assert!(matches!(c.read_bytes(2), Err(Error::UnexpectedEof(_))));
    }
}
