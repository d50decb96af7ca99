//! Primitive decoders for the ccbi wire format.
//!
//! These compose the three [`BitCursor`](super::BitCursor) primitives
//! (`read_byte`, `get_bit`, `align`) into the format's value encodings:
//! booleans, unary-prefixed variable-length integers, tagged floats, and
//! length-prefixed UTF-8 strings.

use byteorder::{ByteOrder, LittleEndian};

use super::cursor::BitCursor;
use super::format::*;
use crate::util::{Error, Result};

impl BitCursor<'_> {
    /// Read a boolean stored as one byte (nonzero = true).
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_byte()? != 0)
    }

    /// Read an unsigned variable-length integer.
    pub fn read_var_uint(&mut self) -> Result<u64> {
        Ok(self.read_var_raw()? - 1)
    }

    /// Read a signed variable-length integer.
    ///
    /// The sign is carried by the parity of the raw value: odd raw values
    /// decode to `raw / 2`, even ones to `-(raw / 2)`. This is the exact
    /// arithmetic of the original encoder and intentionally not a
    /// conventional zig-zag mapping.
    pub fn read_var_int(&mut self) -> Result<i64> {
        let raw = self.read_var_raw()?;
        let half = (raw / 2) as i64;
        if raw % 2 == 1 {
            Ok(half)
        } else {
            Ok(-half)
        }
    }

    /// Read the raw (biased) value shared by both var-int forms.
    ///
    /// A run of `n` zero bits terminated by a one bit announces `n` payload
    /// bits, read MSB-first; bit `n` of the result is the implicit leading
    /// one dropped by the prefix. The cursor is realigned to a byte boundary
    /// afterwards regardless of how many bits were consumed.
    fn read_var_raw(&mut self) -> Result<u64> {
        let mut num_bits = 0u32;
        while !self.get_bit()? {
            num_bits += 1;
            if num_bits > 63 {
                return Err(Error::invalid("variable-length integer prefix too long"));
            }
        }

        let mut current: u64 = 0;
        for a in (0..num_bits).rev() {
            if self.get_bit()? {
                current |= 1 << a;
            }
        }
        current |= 1 << num_bits;

        self.align();
        Ok(current)
    }

    /// Read a tagged float.
    ///
    /// One tag byte selects the representation: the common constants 0, 1,
    /// -1 and 0.5 need no payload, small integral values are stored as a
    /// var-int, and anything else is 4 raw little-endian IEEE-754 bytes.
    pub fn read_float(&mut self) -> Result<f32> {
        let tag = self.read_byte()?;
        match tag {
            FLOAT_TAG_0 => Ok(0.0),
            FLOAT_TAG_1 => Ok(1.0),
            FLOAT_TAG_MINUS1 => Ok(-1.0),
            FLOAT_TAG_05 => Ok(0.5),
            FLOAT_TAG_INT => Ok(self.read_var_int()? as f32),
            _ => {
                let bytes = self.read_bytes(4)?;
                Ok(LittleEndian::read_f32(bytes))
            }
        }
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// The length is a raw big-endian u16, followed by that many payload
    /// bytes. Invalid UTF-8 is a decode error; the payload is not otherwise
    /// validated.
    pub fn read_utf8(&mut self) -> Result<String> {
        let b0 = self.read_byte()? as usize;
        let b1 = self.read_byte()? as usize;
        let len = b0 << 8 | b1;

        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bool() {
        let mut c = BitCursor::new(&[0, 1, 0xFF]);
        assert!(!c.read_bool().unwrap());
        assert!(c.read_bool().unwrap());
        assert!(c.read_bool().unwrap());
    }

    #[test]
    fn test_var_uint_zero_is_single_bit() {
        // A lone 1 bit: num_bits = 0, raw = 1, value = 0.
        let mut c = BitCursor::new(&[0x01]);
        assert_eq!(c.read_var_uint().unwrap(), 0);
        // align() consumed the rest of the byte
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_var_uint_known_patterns() {
        // value 3 -> raw 4 (0b100): bits 0,0,1 then payload 0,0.
        // LSB-first packing gives 0b0000_0100.
        let mut c = BitCursor::new(&[0x04]);
        assert_eq!(c.read_var_uint().unwrap(), 3);

        // value 2 -> raw 3 (0b11): bits 0,1 then payload 1 -> 0b0000_0110.
        let mut c = BitCursor::new(&[0x06]);
        assert_eq!(c.read_var_uint().unwrap(), 2);
    }

    #[test]
    fn test_var_uint_realigns_to_next_byte() {
        // 5-bit encoding of value 3, then a plain byte: the byte read must
        // start exactly one byte after where the bit reads began.
        let mut c = BitCursor::new(&[0x04, 0xAB]);
        assert_eq!(c.read_var_uint().unwrap(), 3);
        assert_eq!(c.position(), 1);
        assert_eq!(c.bit_position(), 0);
        assert_eq!(c.read_byte().unwrap(), 0xAB);
    }

    #[test]
    fn test_var_int_parity_sign() {
        // raw 1 (odd) -> 0
        let mut c = BitCursor::new(&[0x01]);
        assert_eq!(c.read_var_int().unwrap(), 0);

        // raw 3 (odd) -> 1
        let mut c = BitCursor::new(&[0x06]);
        assert_eq!(c.read_var_int().unwrap(), 1);

        // raw 2 (0b10): bits 0,1 then payload 0 -> 0b0000_0010, even -> -1
        let mut c = BitCursor::new(&[0x02]);
        assert_eq!(c.read_var_int().unwrap(), -1);
    }

    #[test]
    fn test_var_uint_truncated() {
        // All-zero byte is an unterminated prefix running off the buffer.
        let mut c = BitCursor::new(&[0x00]);
        assert!(matches!(c.read_var_uint(), Err(Error::UnexpectedEof(_))));
    }

    #[test]
    fn test_float_tag_constants_exact() {
        let mut c = BitCursor::new(&[FLOAT_TAG_0, FLOAT_TAG_1, FLOAT_TAG_MINUS1, FLOAT_TAG_05]);
        assert_eq!(c.read_float().unwrap(), 0.0);
        assert_eq!(c.read_float().unwrap(), 1.0);
        assert_eq!(c.read_float().unwrap(), -1.0);
        assert_eq!(c.read_float().unwrap(), 0.5);
    }

    #[test]
    fn test_float_var_int_payload() {
        // tag 4 followed by var-int 7 (raw 15 = 0b1111: bits 0,0,0,1,1,1,1
        // -> LSB-first 0b0111_1000 = 0x78)
        let mut c = BitCursor::new(&[FLOAT_TAG_INT, 0x78]);
        assert_eq!(c.read_float().unwrap(), 7.0);
    }

    #[test]
    fn test_float_raw_ieee754() {
        let mut buf = vec![FLOAT_TAG_FULL];
        buf.extend_from_slice(&2.5f32.to_le_bytes());
        let mut c = BitCursor::new(&buf);
        assert_eq!(c.read_float().unwrap(), 2.5);
        assert_eq!(c.position(), 5);
    }

    #[test]
    fn test_read_utf8() {
        let mut c = BitCursor::new(&[0x00, 0x03, b'a', b'b', b'c']);
        assert_eq!(c.read_utf8().unwrap(), "abc");
    }

    #[test]
    fn test_read_utf8_empty() {
        let mut c = BitCursor::new(&[0x00, 0x00]);
        assert_eq!(c.read_utf8().unwrap(), "");
    }

    #[test]
    fn test_read_utf8_truncated() {
        let mut c = BitCursor::new(&[0x00, 0x05, b'a']);
        assert!(matches!(c.read_utf8(), Err(Error::UnexpectedEof(_))));
    }

    #[test]
    fn test_read_utf8_invalid_bytes() {
        let mut c = BitCursor::new(&[0x00, 0x02, 0xFF, 0xFE]);
        assert!(matches!(c.read_utf8(), Err(Error::Utf8(_))));
    }
}
