use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, ParseError, ParseErrorType, Parser},
    utils::prelude::SrcSpan
};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut statements: Vec<Statement> = vec![];

        loop {
            parser.skip_newline();

            match &parser.current_token {
                Some((_, Token::Eof, _)) | None => break,
                Some(_) => statements.push(Statement::parse(parser)?)
            }
        }

        let location = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => SrcSpan {
                start: first.location().start,
                end: last.location().end
            },
            _ => SrcSpan { start: 0, end: 0 }
        };

        Ok(Self {
            statements,
            location
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{};", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// statement -> <print> | <assignment> ; | <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print(PrintStatement),
    Assignment(Assignment),
    Expression(Expression),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        parser.skip_newline();

        // an assignment only when `=` immediately follows the identifier
        let is_assignment = matches!(
            (&parser.current_token, &parser.next_token),
            (Some((_, Token::Ident(_), _)), Some((_, Token::Assign, _)))
        );

        let statement = if is_assignment {
            let assignment = Assignment::parse(parser)?;
            parser.expect_one(Token::Semicolon)?;

            Self::Assignment(assignment)
        } else {
            match &parser.current_token {
                Some((_, Token::Print, _)) => {
                    Self::Print(PrintStatement::parse(parser)?)
                },
                Some(_) => {
                    let expression = Expression::parse(parser)?;
                    parser.expect_one(Token::Semicolon)?;

                    Self::Expression(expression)
                },
                None => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        };

        Ok(statement)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Print(print) => write!(f, "{print}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Expression(expression) => write!(f, "{expression}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Print(print) => print.location,
            Self::Assignment(assignment) => assignment.location,
            Self::Expression(expression) => expression.location()
        }
    }
}

// print -> print ( <expression> ) ;
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for PrintStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Print)?;

        parser.expect_one(Token::LParen)?;
        let expression = Expression::parse(parser)?;
        parser.expect_one(Token::RParen)?;

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for PrintStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print({})", self.expression)
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Assignment {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let ident = parser.expect_ident()?;
        let start = ident.0;

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser)?;
        let end = value.location().end;

        Ok(Self {
            identifier: ident.into(),
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// expression -> <assignment> | <or_expr>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Primitive(Primitive),
    Infix(Infix),
    Prefix(Prefix),
    Assignment(Box<Assignment>),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        parser.skip_newline();

        // same raw 2-token lookahead as the statement form
        let is_assignment = matches!(
            (&parser.current_token, &parser.next_token),
            (Some((_, Token::Ident(_), _)), Some((_, Token::Assign, _)))
        );

        if is_assignment {
            let assignment = Assignment::parse(parser)?;

            return Ok(Self::Assignment(Box::new(assignment)));
        }

        Self::parse_or_expr(parser)
    }
}

impl Expression {
    // or_expr -> <and_expr> { or <and_expr> }
    fn parse_or_expr<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_and_expr(parser)?;

        while let Ok(_) = parser.expect_one(Token::Or) {
            let right = Self::parse_and_expr(parser)?;

            left = Self::infix(left, Token::Or, right);
        }

        Ok(left)
    }

    // and_expr -> <not_expr> { and <not_expr> }
    fn parse_and_expr<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_not_expr(parser)?;

        while let Ok(_) = parser.expect_one(Token::And) {
            let right = Self::parse_not_expr(parser)?;

            left = Self::infix(left, Token::And, right);
        }

        Ok(left)
    }

    // not_expr -> not <not_expr> | <comparison>
    fn parse_not_expr<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        parser.skip_newline();

        match &parser.current_token {
            Some((_, Token::Not, _)) => {
                let (start, operator, _) = parser.next_token().unwrap();

                let expression = Self::parse_not_expr(parser)?;
                let end = expression.location().end;

                Ok(Self::Prefix(Prefix {
                    operator,
                    expression: Box::new(expression),
                    location: SrcSpan { start, end }
                }))
            },
            _ => Self::parse_comparison(parser)
        }
    }

    // comparison -> <sum> [ <comp_op> <sum> ]
    //
    // One comparison at most. `a < b < c` leaves `< c` unconsumed and
    // the statement fails at its terminator instead of chaining.
    fn parse_comparison<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let left = Self::parse_sum(parser)?;

        parser.skip_newline();

        match &parser.current_token {
            Some((_, token, _)) if token.is_comparison() => {
                let operator = parser.next_token().unwrap().1;
                let right = Self::parse_sum(parser)?;

                Ok(Self::infix(left, operator, right))
            },
            _ => Ok(left)
        }
    }

    // sum -> <term> { (+ | -) <term> }
    fn parse_sum<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_term(parser)?;

        loop {
            parser.skip_newline();

            match &parser.current_token {
                Some((_, Token::Plus | Token::Minus, _)) => {
                    let operator = parser.next_token().unwrap().1;
                    let right = Self::parse_term(parser)?;

                    left = Self::infix(left, operator, right);
                },
                _ => break
            }
        }

        Ok(left)
    }

    // term -> <factor> { (* | /) <factor> }
    fn parse_term<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_factor(parser)?;

        loop {
            parser.skip_newline();

            match &parser.current_token {
                Some((_, Token::Asterisk | Token::Slash, _)) => {
                    let operator = parser.next_token().unwrap().1;
                    let right = Self::parse_factor(parser)?;

                    left = Self::infix(left, operator, right);
                },
                _ => break
            }
        }

        Ok(left)
    }

    // factor -> <int> | <identifier> | ( <expression> ) | - <factor>
    fn parse_factor<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        parser.skip_newline();

        match &parser.current_token {
            Some((_, Token::Int(_), _)) => {
                Ok(Self::Primitive(Primitive::parse(parser)?))
            },
            Some((_, Token::Ident(_), _)) => {
                let ident = parser.expect_ident()?;

                Ok(Self::Identifier(Identifier::from(ident)))
            },
            Some((_, Token::LParen, _)) => {
                let (start, _) = parser.expect_one(Token::LParen)?;

                let expression = Box::new(Expression::parse(parser)?);

                let (_, end) = parser.expect_one(Token::RParen)?;

                Ok(Self::Nested {
                    expression,
                    location: SrcSpan { start, end }
                })
            },
            Some((_, Token::Minus, _)) => {
                let (start, operator, _) = parser.next_token().unwrap();

                let expression = Self::parse_factor(parser)?;
                let end = expression.location().end;

                Ok(Self::Prefix(Prefix {
                    operator,
                    expression: Box::new(expression),
                    location: SrcSpan { start, end }
                }))
            },
            Some((start, Token::Eof, end)) => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: *start, end: *end }
            ),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected: vec!["an Identifier, Number, `-` or `(`".to_string()]
                },
                SrcSpan { start: *start, end: *end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    fn infix(left: Expression, operator: Token, right: Expression) -> Self {
        let location = SrcSpan {
            start: left.location().start,
            end: right.location().end
        };

        Self::Infix(Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Primitive(primitive) => primitive.location(),
            Self::Infix(infix) => infix.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Assignment(assignment) => assignment.location,
            Self::Nested { location, .. } => *location
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Nested { expression, .. } => write!(f, "({expression})")
        }
    }
}

// identifier -> <letter | _> { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

// prefix -> (not | -) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.operator {
            Token::Not => write!(f, "not {}", self.expression),
            _ => write!(f, "{}{}", self.operator.as_literal(), self.expression)
        }
    }
}

// primitive -> <int>
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Primitive {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::Int(value), end)) => {
                Ok(Self::Int {
                    value,
                    location: SrcSpan { start, end }
                })
            },
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["a Number".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}")
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. } => *location
        }
    }
}
