use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, str::FromStr};

use crate::error::TypeFormulaError;

/// A parsed type expression such as `List<Option<u32>>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFormula {
    pub name: String,
    pub type_parameters: Vec<TypeFormula>,
}

impl TypeFormula {
    pub fn new(name: impl Into<String>, type_parameters: Vec<TypeFormula>) -> Self {
        Self {
            name: name.into(),
            type_parameters,
        }
    }
}

impl fmt::Display for TypeFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.type_parameters.is_empty() {
            return Ok(());
        }

        f.write_str("<")?;
        for (index, parameter) in self.type_parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(">")
    }
}

impl FromStr for TypeFormula {
    type Err = TypeFormulaError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        TypeFormulaParser::new().parse_expression(expression)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    BeginParameters,
    EndParameters,
    Comma,
}

enum StackItem {
    Name(String),
    BeginParameters,
    Formula(TypeFormula),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TypeFormulaParser;

impl TypeFormulaParser {
    const BEGIN_TYPE_PARAMETERS: char = '<';
    const END_TYPE_PARAMETERS: char = '>';
    const COMMA: char = ',';

    pub fn new() -> Self {
        Self
    }

    pub fn parse_expression(&self, expression: &str) -> Result<TypeFormula, TypeFormulaError> {
        let mut stack: Vec<StackItem> = Vec::new();

        for token in self.tokenize(expression.trim()) {
            match token {
                Token::Name(name) => stack.push(StackItem::Name(name)),
                Token::BeginParameters => stack.push(StackItem::BeginParameters),
                Token::Comma => {}
                Token::EndParameters => {
                    let mut type_parameters = Vec::new();
                    loop {
                        match stack.pop() {
                            Some(StackItem::BeginParameters) => break,
                            Some(StackItem::Name(name)) => {
                                type_parameters.push(TypeFormula::new(name, Vec::new()))
                            }
                            Some(StackItem::Formula(formula)) => type_parameters.push(formula),
                            None => return Err(TypeFormulaError::UnbalancedParameters),
                        }
                    }
                    type_parameters.reverse();

                    let Some(StackItem::Name(name)) = stack.pop() else {
                        return Err(TypeFormulaError::UnbalancedParameters);
                    };
                    stack.push(StackItem::Formula(TypeFormula::new(name, type_parameters)));
                }
            }
        }

        if stack.len() != 1 {
            return Err(TypeFormulaError::UnexpectedStackLength(stack.len()));
        }

        match stack.pop() {
            Some(StackItem::Name(name)) => Ok(TypeFormula::new(name, Vec::new())),
            Some(StackItem::Formula(formula)) => Ok(formula),
            Some(StackItem::BeginParameters) => Err(TypeFormulaError::UnexpectedToken(
                Self::BEGIN_TYPE_PARAMETERS.to_string(),
            )),
            None => Err(TypeFormulaError::UnexpectedStackLength(0)),
        }
    }

    fn tokenize(&self, expression: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for character in expression.chars() {
            let punctuation = match character {
                Self::BEGIN_TYPE_PARAMETERS => Token::BeginParameters,
                Self::END_TYPE_PARAMETERS => Token::EndParameters,
                Self::COMMA => Token::Comma,
                _ => {
                    current.push(character);
                    continue;
                }
            };

            Self::flush_name(&mut current, &mut tokens);
            tokens.push(punctuation);
        }

        Self::flush_name(&mut current, &mut tokens);
        tokens
    }

    fn flush_name(current: &mut String, tokens: &mut Vec<Token>) {
        let name = current.trim();
        if !name.is_empty() {
            tokens.push(Token::Name(name.to_string()));
        }
        current.clear();
    }
}
