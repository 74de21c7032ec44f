use crate::{lexer::prelude::{LexResult, Lexer, LexicalError, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Parse, Program};

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        match self.tokens.next() {
            Some(Err(err)) => {
                self.lex_errors.push(err);
            },
            Some(Ok(tok)) => {
                next = Some(tok);
            },
            None => {}
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    pub fn skip_newline(&mut self) {
        while let Some((_, Token::Newline, _)) = self.current_token {
            self.step();
        }
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let program = Program::parse(self);

        // a truncated token stream surfaces as the lexer's own error
        if !self.lex_errors.is_empty() {
            let error = self.lex_errors[0];

            return parse_error(
                ParseErrorType::LexError { error },
                error.location
            );
        }

        program
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        self.skip_newline();

        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some((start, Token::Eof, end)) => {
                self.current_token = Some((start, Token::Eof, end));

                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start, end }
                )
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![token.as_literal()],
                    },
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        self.skip_newline();

        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some((start, Token::Eof, end)) => {
                self.current_token = Some((start, Token::Eof, end));

                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start, end }
                )
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }
}

pub fn parse_program(src: &str) -> Result<Program, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_program_from_stream(stream: impl Iterator<Item = char>) -> Result<Program, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
