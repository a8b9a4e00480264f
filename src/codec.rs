use alloc::{boxed::Box, string::String, vec::Vec};

use crate::{
    bytes::{decode_bytes, encode_bytes, read_length, write_length},
    error::{CodecError, DecodingError},
    primitive::{
        decode_big_int, decode_big_uint, decode_bool, decode_signed, decode_unsigned,
        encode_big_int, encode_big_uint, encode_bool, encode_signed, encode_unsigned, narrow,
    },
    reader::PartReader,
    types::{AbiType, FieldType, VariantType},
    value::{Field, Value},
    writer::DataWriter,
};

/// Nested values are self-delimiting; top-level values rely on the part
/// boundary and drop whatever framing that boundary makes redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    Nested,
    TopLevel,
}

impl EncodingMode {
    fn encode_operation(self) -> &'static str {
        match self {
            EncodingMode::Nested => "encode_nested",
            EncodingMode::TopLevel => "encode_top_level",
        }
    }

    fn decode_operation(self) -> &'static str {
        match self {
            EncodingMode::Nested => "decode_nested",
            EncodingMode::TopLevel => "decode_top_level",
        }
    }
}

pub trait Codec {
    /// Appends the encoding of `value` to the writer's current part.
    fn encode<W: DataWriter>(
        &self,
        writer: &mut W,
        value: &Value,
        mode: EncodingMode,
    ) -> Result<(), CodecError>;

    /// Reads one value of type `ty` from the reader's current part.
    fn decode(
        &self,
        reader: &mut PartReader,
        ty: &AbiType,
        mode: EncodingMode,
    ) -> Result<Value, CodecError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCodec;

impl DefaultCodec {
    pub fn new() -> Self {
        Self
    }

    fn encode_fields<W: DataWriter>(&self, writer: &mut W, fields: &[Field]) -> Result<(), CodecError> {
        for field in fields {
            self.encode(writer, &field.value, EncodingMode::Nested)?;
        }
        Ok(())
    }

    fn encode_items<W: DataWriter>(&self, writer: &mut W, items: &[Value]) -> Result<(), CodecError> {
        for item in items {
            self.encode(writer, item, EncodingMode::Nested)?;
        }
        Ok(())
    }

    fn encode_option<W: DataWriter>(
        &self,
        writer: &mut W,
        inner: Option<&Value>,
        mode: EncodingMode,
    ) -> Result<(), CodecError> {
        match (inner, mode) {
            (None, EncodingMode::TopLevel) => Ok(()),
            (None, EncodingMode::Nested) => writer.append(&[0x00]),
            (Some(inner), _) => {
                writer.append(&[0x01])?;
                self.encode(writer, inner, EncodingMode::Nested)
            }
        }
    }

    fn decode_fields(
        &self,
        reader: &mut PartReader,
        fields: &[FieldType],
    ) -> Result<Vec<Field>, CodecError> {
        fields
            .iter()
            .map(|field| {
                let value = self.decode(reader, &field.ty, EncodingMode::Nested)?;
                Ok::<_, CodecError>(Field::new(field.name.clone(), value))
            })
            .collect()
    }

    fn decode_items(&self, reader: &mut PartReader, items: &[AbiType]) -> Result<Vec<Value>, CodecError> {
        items
            .iter()
            .map(|item| self.decode(reader, item, EncodingMode::Nested))
            .collect()
    }

    fn decode_option(
        &self,
        reader: &mut PartReader,
        inner: &AbiType,
        mode: EncodingMode,
    ) -> Result<Value, CodecError> {
        if mode == EncodingMode::TopLevel && reader.remaining_in_part() == 0 {
            return Ok(Value::Option(None));
        }

        match reader.read(1)?[0] {
            0x00 => Ok(Value::Option(None)),
            0x01 => {
                let inner = self.decode(reader, inner, EncodingMode::Nested)?;
                Ok(Value::Option(Some(Box::new(inner))))
            }
            flag => Err(DecodingError::InvalidOptionFlag(flag).into()),
        }
    }

    fn decode_enum(
        &self,
        reader: &mut PartReader,
        variants: &[VariantType],
        mode: EncodingMode,
    ) -> Result<Value, CodecError> {
        // An empty part stands for the first unit variant.
        if mode == EncodingMode::TopLevel && reader.remaining_in_part() == 0 {
            if let Some(variant) = find_variant(variants, 0).filter(|v| v.fields.is_empty()) {
                return Ok(Value::unit_variant(variant.discriminant));
            }
        }

        let discriminant = reader.read(1)?[0];
        let variant = find_variant(variants, discriminant)
            .ok_or(DecodingError::UnknownDiscriminant(discriminant))?;

        Ok(Value::Enum {
            discriminant,
            fields: self.decode_fields(reader, &variant.fields)?,
        })
    }

    fn decode_list(
        &self,
        reader: &mut PartReader,
        item: &AbiType,
        mode: EncodingMode,
    ) -> Result<Value, CodecError> {
        let mut items = Vec::new();

        match mode {
            EncodingMode::Nested => {
                let count = read_length(reader)?;
                for _ in 0..count {
                    items.push(self.decode(reader, item, EncodingMode::Nested)?);
                }
            }
            EncodingMode::TopLevel => {
                while reader.remaining_in_part() > 0 {
                    let before = reader.remaining_in_part();
                    items.push(self.decode(reader, item, EncodingMode::Nested)?);
                    // Zero-sized items cannot be counted greedily.
                    if reader.remaining_in_part() == before {
                        break;
                    }
                }
            }
        }

        Ok(Value::List(items))
    }
}

fn find_variant(variants: &[VariantType], discriminant: u8) -> Option<&VariantType> {
    variants.iter().find(|v| v.discriminant == discriminant)
}

impl Codec for DefaultCodec {
    fn encode<W: DataWriter>(
        &self,
        writer: &mut W,
        value: &Value,
        mode: EncodingMode,
    ) -> Result<(), CodecError> {
        match value {
            Value::U8(v) => encode_unsigned(writer, u64::from(*v), 1, mode),
            Value::U16(v) => encode_unsigned(writer, u64::from(*v), 2, mode),
            Value::U32(v) => encode_unsigned(writer, u64::from(*v), 4, mode),
            Value::U64(v) => encode_unsigned(writer, *v, 8, mode),
            Value::I8(v) => encode_signed(writer, i64::from(*v), 1, mode),
            Value::I16(v) => encode_signed(writer, i64::from(*v), 2, mode),
            Value::I32(v) => encode_signed(writer, i64::from(*v), 4, mode),
            Value::I64(v) => encode_signed(writer, *v, 8, mode),
            Value::BigUint(v) => encode_big_uint(writer, v, mode),
            Value::BigInt(v) => encode_big_int(writer, v, mode),
            Value::Bool(v) => encode_bool(writer, *v, mode),
            Value::Bytes(data) => encode_bytes(writer, data, mode),
            Value::String(text) => encode_bytes(writer, text.as_bytes(), mode),
            Value::Option(inner) => self.encode_option(writer, inner.as_deref(), mode),
            Value::Struct(fields) => self.encode_fields(writer, fields),
            Value::Tuple(items) => self.encode_items(writer, items),
            Value::Enum {
                discriminant,
                fields,
            } => {
                writer.append(&[*discriminant])?;
                self.encode_fields(writer, fields)
            }
            Value::List(items) => {
                if mode == EncodingMode::Nested {
                    write_length(writer, items.len())?;
                }
                self.encode_items(writer, items)
            }
            Value::Optional(inner) if mode == EncodingMode::TopLevel => match inner {
                Some(inner) => self.encode(writer, inner, EncodingMode::TopLevel),
                None => Ok(()),
            },
            Value::Optional(_) | Value::Multi(_) | Value::Variadic(_) => {
                Err(CodecError::UnsupportedType {
                    when: mode.encode_operation(),
                    type_name: value.kind(),
                })
            }
        }
    }

    fn decode(
        &self,
        reader: &mut PartReader,
        ty: &AbiType,
        mode: EncodingMode,
    ) -> Result<Value, CodecError> {
        let value = match ty {
            AbiType::U8 => Value::U8(narrow(decode_unsigned(reader, 1, "U8", mode)?, "U8")?),
            AbiType::U16 => Value::U16(narrow(decode_unsigned(reader, 2, "U16", mode)?, "U16")?),
            AbiType::U32 => Value::U32(narrow(decode_unsigned(reader, 4, "U32", mode)?, "U32")?),
            AbiType::U64 => Value::U64(decode_unsigned(reader, 8, "U64", mode)?),
            AbiType::I8 => Value::I8(narrow(decode_signed(reader, 1, "I8", mode)?, "I8")?),
            AbiType::I16 => Value::I16(narrow(decode_signed(reader, 2, "I16", mode)?, "I16")?),
            AbiType::I32 => Value::I32(narrow(decode_signed(reader, 4, "I32", mode)?, "I32")?),
            AbiType::I64 => Value::I64(decode_signed(reader, 8, "I64", mode)?),
            AbiType::BigUint => Value::BigUint(decode_big_uint(reader, mode)?),
            AbiType::BigInt => Value::BigInt(decode_big_int(reader, mode)?),
            AbiType::Bool => Value::Bool(decode_bool(reader, mode)?),
            AbiType::Bytes => Value::Bytes(decode_bytes(reader, mode)?),
            AbiType::String => {
                let data = decode_bytes(reader, mode)?;
                let text = core::str::from_utf8(&data).map_err(|_| DecodingError::InvalidUtf8)?;
                Value::String(String::from(text))
            }
            AbiType::Option(inner) => self.decode_option(reader, inner, mode)?,
            AbiType::Struct(fields) => Value::Struct(self.decode_fields(reader, fields)?),
            AbiType::Tuple(items) => Value::Tuple(self.decode_items(reader, items)?),
            AbiType::Enum(variants) => self.decode_enum(reader, variants, mode)?,
            AbiType::List(item) => self.decode_list(reader, item, mode)?,
            AbiType::Optional(inner) if mode == EncodingMode::TopLevel => {
                if reader.remaining_in_part() == 0 {
                    Value::Optional(None)
                } else {
                    let inner = self.decode(reader, inner, EncodingMode::TopLevel)?;
                    Value::Optional(Some(Box::new(inner)))
                }
            }
            AbiType::Optional(_) | AbiType::Multi(_) | AbiType::Variadic(_) => {
                return Err(CodecError::UnsupportedType {
                    when: mode.decode_operation(),
                    type_name: ty.kind(),
                })
            }
        };

        Ok(value)
    }
}
