use alloc::string::String;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("nil input value")]
    NilInputValue,

    #[error("variadic values must be last among the arguments")]
    VariadicMustBeLast,

    #[error("{when}, unsupported type: {type_name}")]
    UnsupportedType {
        when: &'static str,
        type_name: &'static str,
    },

    #[error("cannot write, since there is no part to write to")]
    NoActivePart,

    #[error("length {0} does not fit the 4-byte length prefix")]
    LengthOverflow(usize),

    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodingError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("cannot read {requested} bytes: unexpected end of data ({available} bytes left)")]
    UnexpectedEndOfData { requested: usize, available: usize },

    #[error("unread data in part {index}: {remaining} bytes left")]
    UnreadDataInPart { index: usize, remaining: usize },

    #[error("no data part at index {index}")]
    NoDataPart { index: usize },

    #[error("decoded value is too large for {type_name}: {length} bytes")]
    Overflow {
        type_name: &'static str,
        length: usize,
    },

    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid option flag: {0:#04x}")]
    InvalidOptionFlag(u8),

    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown enum discriminant: {0}")]
    UnknownDiscriminant(u8),

    #[error("parts are not valid hex")]
    InvalidHex,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeFormulaError {
    #[error("badly specified type parameters")]
    UnbalancedParameters,

    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("unexpected stack length at end of parsing: {0}")]
    UnexpectedStackLength(usize),

    #[error("unknown type name: {0}")]
    UnknownTypeName(String),

    #[error("type {name} expects {expected} type parameters, found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
}
