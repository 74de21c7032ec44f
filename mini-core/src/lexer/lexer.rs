use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"print" => Token::Print,
		"and" => Token::And,
		"or" => Token::Or,
		"not" => Token::Not,

		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	reached_eof: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,

			reached_eof: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		let span = match self.ch {
			Some(ch) => match ch {
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				',' => self.eat_one_char(Token::Comma),
				';' => self.eat_one_char(Token::Semicolon),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Asterisk),
				'/' => self.eat_one_char(Token::Slash),
				// `==` before `=`, `<=` before `<`, `>=` before `>`
				'=' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::Equal),
					_ => self.eat_one_char(Token::Assign)
				},
				'<' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::LessThanOrEqual),
					_ => self.eat_one_char(Token::LessThan)
				},
				'>' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::GreaterThanOrEqual),
					_ => self.eat_one_char(Token::GreaterThan)
				},
				// `!` exists only as the first half of `!=`
				'!' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::NotEqual),
					_ => {
						let location = self.position;
						return Err(LexicalError {
							error: LexicalErrorType::UnrecognizedToken { tok: ch },
							location: SrcSpan {
								start: location,
								end: location + 1,
							},
						});
					}
				},
				'a'..='z' | 'A'..='Z' | '_' => {
					return Ok(self.lex_ident());
				},
				'0'..='9' => {
					return self.lex_number();
				},
				'\n' | ' ' | '\t' | '\x0C' | '\r' => {
					let tok_start = self.position;
					let _ = self.next_char();
					let tok_end = self.position;

					return if ch == '\n' {
						Ok((tok_start, Token::Newline, tok_end))
					} else {
						self.next_token()
					}
				}
				c => {
					let location = self.position;
					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan {
							start: location,
							end: location + 1,
						},
					});
				}
			},
			None => {
				self.eat_one_char(Token::Eof)
			}
		};

		Ok(span)
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += 1;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		loop {
			match self.ch {
				Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => {
					ident.push(self.next_char().unwrap())
				},
				_ => break
			}
		}

        let end_pos = self.position;

		// a keyword wins only on a whole-word match
        match str_to_keyword(&ident) {
			Some(tok) => (start_pos, tok, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos)
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;

		let mut value = String::new();

		loop {
			match self.ch {
				Some(ch) if ch.is_ascii_digit() => {
					value.push(self.next_char().unwrap());
				},
				Some(_)
				| None => break
			}
		}

		let end_pos = self.position;

		match value.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerTooLarge,
				location: SrcSpan { start: start_pos, end: end_pos }
			})
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.reached_eof {
			return None;
		}

		let token = self.next_token();

		if let Ok((_, Token::Eof, _)) = token {
			self.reached_eof = true;
		}

		Some(token)
	}
}

pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
	let mut tokens = vec![];

	for result in lexer {
		tokens.push(result?);
	}

	Ok(tokens)
}
