//! Bounds-checked cursor over little-endian, length-prefixed account data.

use solana_program::pubkey::{Pubkey, PUBKEY_BYTES};

use crate::DecodeError;

/// Sequential reader over a borrowed account buffer.
///
/// All reads are checked against the remaining length, so a truncated or hostile buffer
/// yields a [`DecodeError`] and never an out-of-bounds access.
#[derive(Debug, Clone)]
pub struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset,
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.take_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.take_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.take_array().map(u64::from_le_bytes)
    }

    /// Strict boolean: only `0` and `1` are accepted.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { offset, value }),
        }
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey, DecodeError> {
        self.take_array::<PUBKEY_BYTES>().map(Pubkey::new_from_array)
    }

    /// `u32` byte length followed by UTF-8 data. Errors report the offset of the length prefix.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let offset = self.offset;
        let len = self.read_u32()? as usize;
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::StringOverflow {
                offset,
                len,
                available,
            });
        }
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Option discriminant: `0` is absent, `1` is present.
    pub fn read_option_tag(&mut self) -> Result<bool, DecodeError> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidOptionTag { offset, value }),
        }
    }

    /// `u32` element count, rejected up front when `count * min_item_size` cannot fit in
    /// the remaining bytes.
    pub fn read_seq_len(&mut self, min_item_size: usize) -> Result<usize, DecodeError> {
        let offset = self.offset;
        let count = self.read_u32()? as usize;
        let available = self.remaining();
        let fits = count
            .checked_mul(min_item_size)
            .is_some_and(|needed| needed <= available);
        if !fits {
            return Err(DecodeError::SequenceOverflow {
                offset,
                count,
                available,
            });
        }
        Ok(count)
    }

    /// Consume an 8-byte account discriminator and compare it with `expected`.
    pub fn expect_discriminator(&mut self, expected: &[u8; 8]) -> Result<(), DecodeError> {
        let offset = self.offset;
        if self.take_array::<8>()? != *expected {
            return Err(DecodeError::DiscriminatorMismatch { offset });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers_little_endian() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut reader = AccountReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_reports_offset() {
        let data = [0u8; 3];
        let mut reader = AccountReader::new(&data);
        reader.read_u16().unwrap();
        assert_eq!(
            reader.read_u16(),
            Err(DecodeError::UnexpectedEof {
                offset: 2,
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_bool_must_be_zero_or_one() {
        let mut reader = AccountReader::new(&[1, 2]);
        assert!(reader.read_bool().unwrap());
        assert_eq!(
            reader.read_bool(),
            Err(DecodeError::InvalidBool {
                offset: 1,
                value: 2
            })
        );
    }

    #[test]
    fn test_string_length_overflow() {
        // Claims 16 bytes, carries 2.
        let data = [16, 0, 0, 0, b'h', b'i'];
        let mut reader = AccountReader::new(&data);
        assert_eq!(
            reader.read_string(),
            Err(DecodeError::StringOverflow {
                offset: 0,
                len: 16,
                available: 2
            })
        );
    }

    #[test]
    fn test_sequence_length_is_bounded_by_remaining_bytes() {
        let data = [0xff, 0xff, 0xff, 0xff, 0, 0];
        let mut reader = AccountReader::new(&data);
        assert!(matches!(
            reader.read_seq_len(34),
            Err(DecodeError::SequenceOverflow { offset: 0, .. })
        ));
    }

    #[test]
    fn test_discriminator_mismatch() {
        let data = [1u8; 8];
        let mut reader = AccountReader::new(&data);
        assert_eq!(
            reader.expect_discriminator(&[0u8; 8]),
            Err(DecodeError::DiscriminatorMismatch { offset: 0 })
        );
    }
}
