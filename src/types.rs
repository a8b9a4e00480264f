use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    error::TypeFormulaError,
    formula::{TypeFormula, TypeFormulaParser},
};

/// Type descriptor used to drive decoding. Mirrors [`crate::value::Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    BigUint,
    BigInt,
    Bool,
    Bytes,
    String,
    Option(Box<AbiType>),
    Struct(Vec<FieldType>),
    Tuple(Vec<AbiType>),
    Enum(Vec<VariantType>),
    List(Box<AbiType>),
    Optional(Box<AbiType>),
    Multi(Vec<AbiType>),
    Variadic(Box<AbiType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub name: String,
    pub ty: AbiType,
}

impl FieldType {
    pub fn new(name: impl Into<String>, ty: AbiType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantType {
    pub discriminant: u8,
    pub name: String,
    pub fields: Vec<FieldType>,
}

impl VariantType {
    pub fn new(discriminant: u8, name: impl Into<String>, fields: Vec<FieldType>) -> Self {
        Self {
            discriminant,
            name: name.into(),
            fields,
        }
    }

    pub fn unit(discriminant: u8, name: impl Into<String>) -> Self {
        Self::new(discriminant, name, Vec::new())
    }
}

impl AbiType {
    pub fn option(inner: AbiType) -> Self {
        AbiType::Option(Box::new(inner))
    }

    pub fn list(item: AbiType) -> Self {
        AbiType::List(Box::new(item))
    }

    pub fn optional(inner: AbiType) -> Self {
        AbiType::Optional(Box::new(inner))
    }

    pub fn variadic(item: AbiType) -> Self {
        AbiType::Variadic(Box::new(item))
    }

    /// Name of the descriptor, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiType::U8 => "U8",
            AbiType::U16 => "U16",
            AbiType::U32 => "U32",
            AbiType::U64 => "U64",
            AbiType::I8 => "I8",
            AbiType::I16 => "I16",
            AbiType::I32 => "I32",
            AbiType::I64 => "I64",
            AbiType::BigUint => "BigUint",
            AbiType::BigInt => "BigInt",
            AbiType::Bool => "Bool",
            AbiType::Bytes => "Bytes",
            AbiType::String => "String",
            AbiType::Option(_) => "Option",
            AbiType::Struct(_) => "Struct",
            AbiType::Tuple(_) => "Tuple",
            AbiType::Enum(_) => "Enum",
            AbiType::List(_) => "List",
            AbiType::Optional(_) => "Optional",
            AbiType::Multi(_) => "Multi",
            AbiType::Variadic(_) => "Variadic",
        }
    }

    /// Parses a type expression and resolves it against the built-in names.
    pub fn parse(expression: &str) -> Result<Self, TypeFormulaError> {
        let formula = TypeFormulaParser::new().parse_expression(expression)?;
        Self::from_formula(&formula)
    }

    /// Resolves a formula. Structs and enums need a schema and cannot be
    /// expressed as formulas.
    pub fn from_formula(formula: &TypeFormula) -> Result<Self, TypeFormulaError> {
        let name = formula.name.as_str();
        let parameters = formula
            .type_parameters
            .iter()
            .map(Self::from_formula)
            .collect::<Result<Vec<_>, _>>()?;

        let scalar = match name {
            "u8" => Some(AbiType::U8),
            "u16" => Some(AbiType::U16),
            "u32" => Some(AbiType::U32),
            "u64" => Some(AbiType::U64),
            "i8" => Some(AbiType::I8),
            "i16" => Some(AbiType::I16),
            "i32" => Some(AbiType::I32),
            "i64" => Some(AbiType::I64),
            "BigUint" => Some(AbiType::BigUint),
            "BigInt" => Some(AbiType::BigInt),
            "bool" => Some(AbiType::Bool),
            "bytes" => Some(AbiType::Bytes),
            "utf-8 string" => Some(AbiType::String),
            _ => None,
        };
        if let Some(scalar) = scalar {
            expect_arity(name, &parameters, 0)?;
            return Ok(scalar);
        }

        match name {
            "Option" => Ok(AbiType::option(single(name, parameters)?)),
            "List" => Ok(AbiType::list(single(name, parameters)?)),
            "optional" => Ok(AbiType::optional(single(name, parameters)?)),
            "variadic" => Ok(AbiType::variadic(single(name, parameters)?)),
            "multi" => Ok(AbiType::Multi(parameters)),
            _ => match name.strip_prefix("tuple") {
                Some("") => Ok(AbiType::Tuple(parameters)),
                Some(arity) => match arity.parse::<usize>() {
                    Ok(arity) => {
                        expect_arity(name, &parameters, arity)?;
                        Ok(AbiType::Tuple(parameters))
                    }
                    Err(_) => Err(TypeFormulaError::UnknownTypeName(name.to_string())),
                },
                None => Err(TypeFormulaError::UnknownTypeName(name.to_string())),
            },
        }
    }
}

fn expect_arity(
    name: &str,
    parameters: &[AbiType],
    expected: usize,
) -> Result<(), TypeFormulaError> {
    if parameters.len() != expected {
        return Err(TypeFormulaError::WrongArity {
            name: name.to_string(),
            expected,
            found: parameters.len(),
        });
    }
    Ok(())
}

fn single(name: &str, parameters: Vec<AbiType>) -> Result<AbiType, TypeFormulaError> {
    let [parameter]: [AbiType; 1] =
        parameters
            .try_into()
            .map_err(|parameters: Vec<AbiType>| TypeFormulaError::WrongArity {
                name: name.to_string(),
                expected: 1,
                found: parameters.len(),
            })?;
    Ok(parameter)
}
