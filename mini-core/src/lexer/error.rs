use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    IntegerTooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Unrecognized character", vec![format!("`{tok}` matches no token rule")])
            },
            LexicalErrorType::IntegerTooLarge => {
                ("Integer literal is too large", vec![])
            }
        }
    }
}
