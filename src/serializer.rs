use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::{
    codec::{Codec, DefaultCodec, EncodingMode},
    error::CodecError,
    reader::PartReader,
    types::AbiType,
    value::Value,
    writer::{DataWriter, PartWriter},
};

/// Turns an ordered argument list into parts, one part per leaf argument.
///
/// `Multi` and `Variadic` arguments are flattened: their items become
/// consecutive parts of their own. Everything else is encoded top-level into
/// a freshly started part.
#[derive(Debug, Default, Clone)]
pub struct Serializer<C = DefaultCodec> {
    codec: C,
}

impl Serializer<DefaultCodec> {
    pub fn new() -> Self {
        Self::with_codec(DefaultCodec)
    }
}

impl<C: Codec> Serializer<C> {
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Writes `arguments` into `writer`. A `None` argument is rejected with
    /// [`CodecError::NilInputValue`]; a `Variadic` anywhere but last with
    /// [`CodecError::VariadicMustBeLast`]. Both are checked before the first
    /// part is started, so on those errors the writer is untouched.
    pub fn serialize<W: DataWriter>(
        &self,
        writer: &mut W,
        arguments: &[Option<Value>],
    ) -> Result<(), CodecError> {
        debug!(arguments = arguments.len(), "serializing arguments");

        let values = Self::check_arguments(arguments)?;
        for value in values {
            self.serialize_value(writer, value)?;
        }

        Ok(())
    }

    fn check_arguments(arguments: &[Option<Value>]) -> Result<Vec<&Value>, CodecError> {
        let mut values = Vec::with_capacity(arguments.len());
        for (index, argument) in arguments.iter().enumerate() {
            let value = argument.as_ref().ok_or(CodecError::NilInputValue)?;
            if matches!(value, Value::Variadic(_)) && index + 1 != arguments.len() {
                return Err(CodecError::VariadicMustBeLast);
            }
            values.push(value);
        }
        Ok(values)
    }

    fn serialize_value<W: DataWriter>(&self, writer: &mut W, value: &Value) -> Result<(), CodecError> {
        if let Some(items) = value.grouped_items() {
            for item in items {
                self.serialize_value(writer, item)?;
            }
            return Ok(());
        }

        trace!(kind = value.kind(), "starting new part");
        writer.start_new_part();
        self.codec.encode(writer, value, EncodingMode::TopLevel)
    }

    pub fn serialize_to_parts(&self, arguments: &[Option<Value>]) -> Result<Vec<Bytes>, CodecError> {
        let mut writer = PartWriter::new();
        self.serialize(&mut writer, arguments)?;
        Ok(writer.into_parts())
    }

    /// Hex parts joined by `@`, e.g. `"0100@01"`.
    pub fn serialize_to_hex(&self, arguments: &[Option<Value>]) -> Result<String, CodecError> {
        let mut writer = PartWriter::new();
        self.serialize(&mut writer, arguments)?;
        Ok(writer.to_string())
    }

    /// Reads one value per descriptor. Each descriptor consumes exactly one
    /// part, except `Multi` (one part per item), `Variadic` (every remaining
    /// part) and `Optional` (no part when the data has run out).
    pub fn deserialize(
        &self,
        reader: &mut PartReader,
        types: &[AbiType],
    ) -> Result<Vec<Value>, CodecError> {
        debug!(types = types.len(), parts = reader.num_parts(), "deserializing arguments");

        let mut values = Vec::with_capacity(types.len());
        for (index, ty) in types.iter().enumerate() {
            if matches!(ty, AbiType::Variadic(_)) && index + 1 != types.len() {
                return Err(CodecError::VariadicMustBeLast);
            }
            values.push(self.deserialize_value(reader, ty)?);
        }

        Ok(values)
    }

    pub fn deserialize_hex(&self, encoded: &str, types: &[AbiType]) -> Result<Vec<Value>, CodecError> {
        let mut reader = PartReader::from_hex(encoded)?;
        self.deserialize(&mut reader, types)
    }

    fn deserialize_value(&self, reader: &mut PartReader, ty: &AbiType) -> Result<Value, CodecError> {
        match ty {
            AbiType::Multi(items) => {
                let values = items
                    .iter()
                    .map(|item| self.deserialize_value(reader, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Multi(values))
            }
            AbiType::Variadic(item) => {
                let mut values = Vec::new();
                while !reader.is_end_of_data() {
                    let before = reader.current_part_index();
                    values.push(self.deserialize_value(reader, item)?);
                    if reader.current_part_index() == before {
                        break;
                    }
                }
                Ok(Value::Variadic(values))
            }
            AbiType::Optional(inner) if reader.is_end_of_data() => {
                trace!(kind = inner.kind(), "optional argument absent");
                Ok(Value::Optional(None))
            }
            ty => {
                trace!(
                    kind = ty.kind(),
                    part = reader.current_part_index(),
                    "decoding part"
                );
                let value = self.codec.decode(reader, ty, EncodingMode::TopLevel)?;
                reader.goto_next_part()?;
                Ok(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodingError;

    fn to_hex(arguments: Vec<Value>) -> Result<String, CodecError> {
        let arguments: Vec<_> = arguments.into_iter().map(Some).collect();
        Serializer::new().serialize_to_hex(&arguments)
    }

    #[test]
    fn test_one_part_per_argument() {
        assert_eq!(
            to_hex(vec![Value::U8(0x42), Value::U16(0x4243), Value::U32(0x42434445)]),
            Ok("42@4243@42434445".into())
        );
        assert_eq!(to_hex(vec![]), Ok("".into()));
        assert_eq!(to_hex(vec![Value::U64(0)]), Ok("".into()));
        assert_eq!(to_hex(vec![Value::U64(0), Value::U8(0)]), Ok("@".into()));
    }

    #[test]
    fn test_multi_and_variadic_are_flattened() {
        let arguments = vec![
            Value::Multi(vec![Value::U8(1), Value::Multi(vec![Value::U8(2)])]),
            Value::Variadic(vec![Value::from("A"), Value::from("B"), Value::from("C")]),
        ];
        assert_eq!(to_hex(arguments), Ok("01@02@41@42@43".into()));

        assert_eq!(to_hex(vec![Value::Variadic(vec![])]), Ok("".into()));
    }

    #[test]
    fn test_variadic_of_multi() {
        let arguments = vec![Value::Variadic(vec![
            Value::Multi(vec![Value::U8(1), Value::from("a")]),
            Value::Multi(vec![Value::U8(2), Value::from("b")]),
        ])];
        assert_eq!(to_hex(arguments), Ok("01@61@02@62".into()));
    }

    #[test]
    fn test_variadic_must_be_last() {
        let arguments = vec![Value::Variadic(vec![Value::U8(1)]), Value::U8(2)];
        assert_eq!(to_hex(arguments), Err(CodecError::VariadicMustBeLast));

        // Only the argument list itself is checked.
        let arguments = vec![Value::Multi(vec![Value::Variadic(vec![Value::U8(1)]), Value::U8(2)])];
        assert_eq!(to_hex(arguments), Ok("01@02".into()));
    }

    #[test]
    fn test_nil_argument() {
        let mut writer = PartWriter::new();
        let result = Serializer::new().serialize(&mut writer, &[Some(Value::U8(1)), None]);
        assert_eq!(result, Err(CodecError::NilInputValue));
        assert_eq!(writer.num_parts(), 0);
    }

    #[test]
    fn test_misplaced_variadic_writes_nothing() {
        let mut writer = PartWriter::new();
        let arguments = [
            Some(Value::U8(1)),
            Some(Value::Variadic(vec![Value::U8(2)])),
            Some(Value::U8(3)),
        ];
        let result = Serializer::new().serialize(&mut writer, &arguments);
        assert_eq!(result, Err(CodecError::VariadicMustBeLast));
        assert_eq!(writer.num_parts(), 0);
    }

    #[test]
    fn test_optional_argument() {
        assert_eq!(
            to_hex(vec![Value::U8(1), Value::optional(Some(Value::U8(2)))]),
            Ok("01@02".into())
        );
        assert_eq!(to_hex(vec![Value::U8(1), Value::optional(None)]), Ok("01@".into()));
    }

    #[test]
    fn test_deserialize() {
        let types = [
            AbiType::U8,
            AbiType::Multi(vec![AbiType::Bool, AbiType::String]),
            AbiType::variadic(AbiType::U16),
        ];
        let values = Serializer::new().deserialize_hex("2a@01@6869@01@0200", &types).unwrap();
        assert_eq!(
            values,
            vec![
                Value::U8(42),
                Value::Multi(vec![Value::Bool(true), Value::from("hi")]),
                Value::Variadic(vec![Value::U16(1), Value::U16(0x200)]),
            ]
        );
    }

    #[test]
    fn test_deserialize_optional() {
        let types = [AbiType::U8, AbiType::optional(AbiType::U32)];
        let serializer = Serializer::new();

        assert_eq!(
            serializer.deserialize_hex("01", &types),
            Ok(vec![Value::U8(1), Value::optional(None)])
        );
        assert_eq!(
            serializer.deserialize_hex("01@", &types),
            Ok(vec![Value::U8(1), Value::optional(None)])
        );
        assert_eq!(
            serializer.deserialize_hex("01@0100", &types),
            Ok(vec![Value::U8(1), Value::optional(Some(Value::U32(256)))])
        );
    }

    #[test]
    fn test_deserialize_single_empty_part() {
        let serializer = Serializer::new();
        assert_eq!(
            serializer.deserialize_hex("", &[AbiType::variadic(AbiType::U8)]),
            Ok(vec![Value::Variadic(vec![Value::U8(0)])])
        );
        assert_eq!(serializer.deserialize_hex("", &[]), Ok(vec![]));
    }

    #[test]
    fn test_deserialize_errors() {
        let serializer = Serializer::new();
        assert_eq!(
            serializer.deserialize_hex("01", &[AbiType::U8, AbiType::U8]),
            Err(CodecError::Decoding(DecodingError::NoDataPart { index: 1 }))
        );
        assert_eq!(
            serializer.deserialize_hex("", &[AbiType::variadic(AbiType::U8), AbiType::U8]),
            Err(CodecError::VariadicMustBeLast)
        );
        assert_eq!(
            serializer.deserialize_hex("0x", &[AbiType::U8]),
            Err(CodecError::Decoding(DecodingError::InvalidHex))
        );
    }
}
