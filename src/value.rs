use alloc::{boxed::Box, string::String, vec::Vec};

use alloy_primitives::{I256, U256};
use bytes::Bytes;

/// An ABI call argument, before encoding.
///
/// `Multi` and `Variadic` are grouping constructs: they never encode to bytes
/// themselves and are only meaningful at the top level of an argument list.
/// `Optional` is the trailing-argument convenience form; unlike `Option` it
/// carries no presence flag and occupies zero bytes when absent. A present
/// value whose top-level encoding is itself empty (`U64(0)`, `Bool(false)`,
/// an empty `List`) therefore reads back as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    BigUint(U256),
    BigInt(I256),
    Bool(bool),
    Bytes(Bytes),
    String(String),
    Option(Option<Box<Value>>),
    Struct(Vec<Field>),
    Tuple(Vec<Value>),
    Enum { discriminant: u8, fields: Vec<Field> },
    List(Vec<Value>),
    Optional(Option<Box<Value>>),
    Multi(Vec<Value>),
    Variadic(Vec<Value>),
}

/// A named member of a struct or enum variant. The name never reaches the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Value {
    pub fn some(value: Value) -> Self {
        Value::Option(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        Value::Option(None)
    }

    pub fn optional(value: Option<Value>) -> Self {
        Value::Optional(value.map(Box::new))
    }

    pub fn unit_variant(discriminant: u8) -> Self {
        Value::Enum {
            discriminant,
            fields: Vec::new(),
        }
    }

    /// Name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::U8(_) => "U8",
            Value::U16(_) => "U16",
            Value::U32(_) => "U32",
            Value::U64(_) => "U64",
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::BigUint(_) => "BigUint",
            Value::BigInt(_) => "BigInt",
            Value::Bool(_) => "Bool",
            Value::Bytes(_) => "Bytes",
            Value::String(_) => "String",
            Value::Option(_) => "Option",
            Value::Struct(_) => "Struct",
            Value::Tuple(_) => "Tuple",
            Value::Enum { .. } => "Enum",
            Value::List(_) => "List",
            Value::Optional(_) => "Optional",
            Value::Multi(_) => "Multi",
            Value::Variadic(_) => "Variadic",
        }
    }

    /// Items of a `Multi` or `Variadic` grouping, `None` for every other value.
    pub fn grouped_items(&self) -> Option<&[Value]> {
        match self {
            Value::Multi(items) | Value::Variadic(items) => Some(items),
            _ => None,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::$variant(value)
                }
            }
        )+
    };
}

impl_from_scalar!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    U256 => BigUint,
    I256 => BigInt,
    bool => Bool,
    Bytes => Bytes,
    String => String,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(value))
    }
}
