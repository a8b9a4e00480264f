use alloc::vec::Vec;

use bytes::Bytes;

use crate::{
    error::{CodecError, DecodingError},
    writer::PARTS_SEPARATOR,
};

/// Reading side of [`crate::writer::PartWriter`]: walks an ordered list of parts,
/// one part at a time, with a read offset inside the current part.
#[derive(Debug, Default, Clone)]
pub struct PartReader {
    parts: Vec<Bytes>,
    index: usize,
    offset: usize,
}

impl PartReader {
    pub fn new(parts: Vec<Bytes>) -> Self {
        Self {
            parts,
            index: 0,
            offset: 0,
        }
    }

    /// Parses the `@`-separated hex form. The empty string is a single empty
    /// part, the same as `n` separators stand for `n + 1` parts.
    pub fn from_hex(encoded: &str) -> Result<Self, CodecError> {
        let parts = encoded
            .split(PARTS_SEPARATOR)
            .map(|part| hex::decode(part).map(Bytes::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| DecodingError::InvalidHex)?;

        Ok(Self::new(parts))
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn current_part_index(&self) -> usize {
        self.index
    }

    /// True once the reader has moved beyond the last part.
    pub fn is_end_of_data(&self) -> bool {
        self.index >= self.parts.len()
    }

    pub fn remaining_in_part(&self) -> usize {
        self.parts
            .get(self.index)
            .map_or(0, |part| part.len() - self.offset)
    }

    pub fn is_current_part_empty(&self) -> bool {
        self.parts.get(self.index).is_some_and(Bytes::is_empty)
    }

    /// Reads exactly `len` bytes from the current part.
    pub fn read(&mut self, len: usize) -> Result<Bytes, CodecError> {
        let part = self
            .parts
            .get(self.index)
            .ok_or(DecodingError::NoDataPart { index: self.index })?;

        let available = part.len() - self.offset;
        if len > available {
            return Err(DecodingError::UnexpectedEndOfData {
                requested: len,
                available,
            }
            .into());
        }

        let data = part.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(data)
    }

    /// Reads everything left in the current part.
    pub fn read_whole_part(&mut self) -> Result<Bytes, CodecError> {
        if self.is_end_of_data() {
            return Err(DecodingError::NoDataPart { index: self.index }.into());
        }
        self.read(self.remaining_in_part())
    }

    /// Moves to the next part. The current one must be fully consumed.
    pub fn goto_next_part(&mut self) -> Result<(), CodecError> {
        if self.is_end_of_data() {
            return Err(DecodingError::NoDataPart { index: self.index }.into());
        }

        let remaining = self.remaining_in_part();
        if remaining > 0 {
            return Err(DecodingError::UnreadDataInPart {
                index: self.index,
                remaining,
            }
            .into());
        }

        self.index += 1;
        self.offset = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_from_hex() {
        let reader = PartReader::from_hex("42@@4243").unwrap();
        assert_eq!(reader.num_parts(), 3);
        assert!(!reader.is_end_of_data());

        let reader = PartReader::from_hex("").unwrap();
        assert_eq!(reader.num_parts(), 1);
        assert!(reader.is_current_part_empty());

        let reader = PartReader::from_hex("@").unwrap();
        assert_eq!(reader.num_parts(), 2);

        assert_eq!(
            PartReader::from_hex("4x").unwrap_err(),
            CodecError::Decoding(DecodingError::InvalidHex)
        );
    }

    #[test]
    fn test_read_within_part() {
        let mut reader = PartReader::new(vec![Bytes::copy_from_slice(&hex!("01020304"))]);

        assert_eq!(reader.read(1).unwrap().as_ref(), &[0x01]);
        assert_eq!(reader.remaining_in_part(), 3);
        assert_eq!(reader.read_whole_part().unwrap().as_ref(), &hex!("020304"));
        assert_eq!(reader.remaining_in_part(), 0);
        assert_eq!(
            reader.read(1).unwrap_err(),
            CodecError::Decoding(DecodingError::UnexpectedEndOfData {
                requested: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn test_goto_next_part() {
        let mut reader = PartReader::new(vec![
            Bytes::from_static(&[0x01, 0x02]),
            Bytes::new(),
        ]);

        reader.read(1).unwrap();
        assert_eq!(
            reader.goto_next_part().unwrap_err(),
            CodecError::Decoding(DecodingError::UnreadDataInPart {
                index: 0,
                remaining: 1,
            })
        );

        reader.read(1).unwrap();
        reader.goto_next_part().unwrap();
        assert!(reader.is_current_part_empty());
        reader.goto_next_part().unwrap();
        assert!(reader.is_end_of_data());

        assert_eq!(
            reader.goto_next_part().unwrap_err(),
            CodecError::Decoding(DecodingError::NoDataPart { index: 2 })
        );
        assert_eq!(
            reader.read(1).unwrap_err(),
            CodecError::Decoding(DecodingError::NoDataPart { index: 2 })
        );
    }
}
