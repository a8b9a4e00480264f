use alloc::vec::Vec;
use core::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::CodecError;

/// Separator used by the textual (hex) form of a parts list.
pub const PARTS_SEPARATOR: &str = "@";

/// Sink the codec writes into. Bytes always land in the current part.
pub trait DataWriter {
    fn start_new_part(&mut self);
    fn append(&mut self, data: &[u8]) -> Result<(), CodecError>;
}

/// Append-only collection of parts.
///
/// A fresh writer has no parts; `append` fails with [`CodecError::NoActivePart`]
/// until [`PartWriter::start_new_part`] has been called at least once.
#[derive(Debug, Default, Clone)]
pub struct PartWriter {
    parts: Vec<BytesMut>,
    current: Option<usize>,
}

impl PartWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[BytesMut] {
        &self.parts
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn current_part_index(&self) -> Option<usize> {
        self.current
    }

    /// Consumes the writer, freezing every part.
    pub fn into_parts(self) -> Vec<Bytes> {
        self.parts.into_iter().map(BytesMut::freeze).collect()
    }
}

impl DataWriter for PartWriter {
    fn start_new_part(&mut self) {
        self.parts.push(BytesMut::new());
        self.current = Some(self.parts.len() - 1);
    }

    fn append(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let index = self.current.ok_or(CodecError::NoActivePart)?;
        self.parts[index].put_slice(data);
        Ok(())
    }
}

impl fmt::Display for PartWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                f.write_str(PARTS_SEPARATOR)?;
            }
            f.write_str(&hex::encode(part))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_without_part() {
        let mut writer = PartWriter::new();
        assert_eq!(writer.append(&[0x01]), Err(CodecError::NoActivePart));
        assert_eq!(writer.num_parts(), 0);
    }

    #[test]
    fn test_append_goes_to_current_part() {
        let mut writer = PartWriter::new();
        writer.start_new_part();
        writer.append(&[0x01, 0x02]).unwrap();
        writer.append(&[0x03]).unwrap();
        writer.start_new_part();
        writer.append(&[0xff]).unwrap();

        assert_eq!(writer.current_part_index(), Some(1));
        assert_eq!(writer.parts()[0].as_ref(), &[0x01, 0x02, 0x03]);
        assert_eq!(writer.parts()[1].as_ref(), &[0xff]);
    }

    #[test]
    fn test_empty_part_is_kept() {
        let mut writer = PartWriter::new();
        writer.start_new_part();
        writer.start_new_part();
        writer.append(&[0x2a]).unwrap();

        let parts = writer.into_parts();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].is_empty());
    }

    #[test]
    fn test_display_hex() {
        let mut writer = PartWriter::new();
        assert_eq!(writer.to_string(), "");

        writer.start_new_part();
        writer.append(&[0x42]).unwrap();
        writer.start_new_part();
        writer.start_new_part();
        writer.append(&[0x42, 0x43]).unwrap();
        assert_eq!(writer.to_string(), "42@@4243");
    }
}
