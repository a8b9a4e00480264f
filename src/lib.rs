#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bytes;
pub mod codec;
pub mod error;
pub mod formula;
pub mod primitive;
pub mod reader;
pub mod serializer;
pub mod types;
pub mod value;
pub mod writer;


pub use codec::{Codec, DefaultCodec, EncodingMode};
pub use error::{CodecError, DecodingError, TypeFormulaError};
pub use formula::{TypeFormula, TypeFormulaParser};
pub use reader::PartReader;
pub use serializer::Serializer;
pub use types::{AbiType, FieldType, VariantType};
pub use value::{Field, Value};
pub use writer::{DataWriter, PartWriter, PARTS_SEPARATOR};
