use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected identifier", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Int(_) => "an Int".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    _ if token.is_reserved_word() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}
