use alloy_primitives::{I256, U256};
use byteorder::{BigEndian, ByteOrder};

use crate::{
    bytes::{decode_bytes, encode_bytes},
    codec::EncodingMode,
    error::{CodecError, DecodingError},
    reader::PartReader,
    writer::DataWriter,
};

const WORD_SIZE: usize = core::mem::size_of::<u64>();
const BIG_WORD_SIZE: usize = 32;

/// Drops leading zero bytes. Zero becomes the empty slice.
pub fn trim_unsigned(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|&b| b != 0).unwrap_or(data.len());
    &data[start..]
}

/// Drops leading sign-extension bytes of a two's-complement number, keeping
/// the sign bit of the first remaining byte intact. Zero becomes the empty slice.
pub fn trim_signed(data: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < data.len() {
        let (head, next) = (data[start], data[start + 1]);
        let redundant =
            (head == 0x00 && next & 0x80 == 0) || (head == 0xff && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }

    if data[start..] == [0x00u8] {
        return &data[data.len()..];
    }
    &data[start..]
}

fn overflow(type_name: &'static str, length: usize) -> CodecError {
    DecodingError::Overflow { type_name, length }.into()
}

/// Nested form keeps the last `width` bytes of the big-endian word; top-level
/// form keeps only the significant ones.
pub fn encode_unsigned<W: DataWriter>(
    writer: &mut W,
    value: u64,
    width: usize,
    mode: EncodingMode,
) -> Result<(), CodecError> {
    let mut word = [0u8; WORD_SIZE];
    BigEndian::write_u64(&mut word, value);
    match mode {
        EncodingMode::Nested => writer.append(&word[WORD_SIZE - width..]),
        EncodingMode::TopLevel => writer.append(trim_unsigned(&word)),
    }
}

pub fn encode_signed<W: DataWriter>(
    writer: &mut W,
    value: i64,
    width: usize,
    mode: EncodingMode,
) -> Result<(), CodecError> {
    let mut word = [0u8; WORD_SIZE];
    BigEndian::write_i64(&mut word, value);
    match mode {
        EncodingMode::Nested => writer.append(&word[WORD_SIZE - width..]),
        EncodingMode::TopLevel => writer.append(trim_signed(&word)),
    }
}

pub fn decode_unsigned(
    reader: &mut PartReader,
    width: usize,
    type_name: &'static str,
    mode: EncodingMode,
) -> Result<u64, CodecError> {
    let data = match mode {
        EncodingMode::Nested => reader.read(width)?,
        EncodingMode::TopLevel => reader.read_whole_part()?,
    };

    let significant = trim_unsigned(&data);
    if significant.len() > width {
        return Err(overflow(type_name, data.len()));
    }

    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(BigEndian::read_u64(&word))
}

pub fn decode_signed(
    reader: &mut PartReader,
    width: usize,
    type_name: &'static str,
    mode: EncodingMode,
) -> Result<i64, CodecError> {
    let data = match mode {
        EncodingMode::Nested => reader.read(width)?,
        EncodingMode::TopLevel => reader.read_whole_part()?,
    };

    let significant = trim_signed(&data);
    if significant.len() > width {
        return Err(overflow(type_name, data.len()));
    }

    let fill = match significant.first() {
        Some(b) if b & 0x80 != 0 => 0xff,
        _ => 0x00,
    };
    let mut word = [fill; WORD_SIZE];
    word[WORD_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(BigEndian::read_i64(&word))
}

/// Narrows a decoded word to the target integer type.
pub fn narrow<T, N>(value: N, type_name: &'static str) -> Result<T, CodecError>
where
    T: TryFrom<N>,
{
    T::try_from(value).map_err(|_| overflow(type_name, core::mem::size_of::<N>()))
}

pub fn encode_bool<W: DataWriter>(
    writer: &mut W,
    value: bool,
    mode: EncodingMode,
) -> Result<(), CodecError> {
    match (mode, value) {
        (EncodingMode::TopLevel, false) => Ok(()),
        (_, value) => writer.append(&[u8::from(value)]),
    }
}

pub fn decode_bool(reader: &mut PartReader, mode: EncodingMode) -> Result<bool, CodecError> {
    let data = match mode {
        EncodingMode::Nested => reader.read(1)?,
        EncodingMode::TopLevel => reader.read_whole_part()?,
    };

    match (mode, data.as_ref()) {
        (EncodingMode::TopLevel, []) => Ok(false),
        (_, [0x00]) => Ok(false),
        (_, [0x01]) => Ok(true),
        (_, [other, ..]) => Err(DecodingError::InvalidBool(*other).into()),
        (EncodingMode::Nested, []) => Err(DecodingError::UnexpectedEndOfData {
            requested: 1,
            available: 0,
        }
        .into()),
    }
}

// Big numbers: minimal bytes at top level, length-prefixed minimal bytes when nested.

pub fn encode_big_uint<W: DataWriter>(
    writer: &mut W,
    value: &U256,
    mode: EncodingMode,
) -> Result<(), CodecError> {
    let word = value.to_be_bytes::<BIG_WORD_SIZE>();
    encode_bytes(writer, trim_unsigned(&word), mode)
}

pub fn encode_big_int<W: DataWriter>(
    writer: &mut W,
    value: &I256,
    mode: EncodingMode,
) -> Result<(), CodecError> {
    let word = value.into_raw().to_be_bytes::<BIG_WORD_SIZE>();
    encode_bytes(writer, trim_signed(&word), mode)
}

pub fn decode_big_uint(reader: &mut PartReader, mode: EncodingMode) -> Result<U256, CodecError> {
    let data = decode_bytes(reader, mode)?;
    let significant = trim_unsigned(&data);
    if significant.len() > BIG_WORD_SIZE {
        return Err(overflow("BigUint", data.len()));
    }

    let mut word = [0u8; BIG_WORD_SIZE];
    word[BIG_WORD_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(U256::from_be_bytes(word))
}

pub fn decode_big_int(reader: &mut PartReader, mode: EncodingMode) -> Result<I256, CodecError> {
    let data = decode_bytes(reader, mode)?;
    let significant = trim_signed(&data);
    if significant.len() > BIG_WORD_SIZE {
        return Err(overflow("BigInt", data.len()));
    }

    let fill = match significant.first() {
        Some(b) if b & 0x80 != 0 => 0xff,
        _ => 0x00,
    };
    let mut word = [fill; BIG_WORD_SIZE];
    word[BIG_WORD_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(I256::from_raw(U256::from_be_bytes(word)))
}
