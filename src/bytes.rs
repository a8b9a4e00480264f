use byteorder::{BigEndian, ByteOrder};
use bytes::{Buf, Bytes};

use crate::{codec::EncodingMode, error::CodecError, reader::PartReader, writer::DataWriter};

/// Size of the big-endian length (or item count) prefix of nested payloads.
pub const LENGTH_PREFIX_SIZE: usize = core::mem::size_of::<u32>();

pub fn write_length<W: DataWriter>(writer: &mut W, length: usize) -> Result<(), CodecError> {
    let length = u32::try_from(length).map_err(|_| CodecError::LengthOverflow(length))?;
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    BigEndian::write_u32(&mut prefix, length);
    writer.append(&prefix)
}

pub fn read_length(reader: &mut PartReader) -> Result<usize, CodecError> {
    let mut prefix = reader.read(LENGTH_PREFIX_SIZE)?;
    Ok(prefix.get_u32() as usize)
}

/// Nested: length prefix, then the payload. Top-level: the payload alone, the
/// part boundary tells its length.
pub fn encode_bytes<W: DataWriter>(
    writer: &mut W,
    data: &[u8],
    mode: EncodingMode,
) -> Result<(), CodecError> {
    if mode == EncodingMode::Nested {
        write_length(writer, data.len())?;
    }
    writer.append(data)
}

pub fn decode_bytes(reader: &mut PartReader, mode: EncodingMode) -> Result<Bytes, CodecError> {
    match mode {
        EncodingMode::Nested => {
            let length = read_length(reader)?;
            reader.read(length)
        }
        EncodingMode::TopLevel => reader.read_whole_part(),
    }
}
