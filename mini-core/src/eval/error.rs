use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    UndefinedVariable { name: String },
    DivisionByZero,
    InvalidOperator { token: Token },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::UndefinedVariable { name } => {
                ("Undefined variable", vec![format!("`{name}` is not bound to any value")])
            },
            RuntimeErrorType::DivisionByZero => {
                ("Division by zero", vec![])
            },
            RuntimeErrorType::InvalidOperator { token } => {
                ("Invalid operator", vec![format!("`{}` cannot be evaluated here", token.as_literal())])
            }
        }
    }
}
