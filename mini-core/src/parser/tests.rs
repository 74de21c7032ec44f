use crate::lexer::prelude::Token;

use super::prelude::{
    parse_program, Expression, ParseError, ParseErrorType, Statement
};

fn parse_statement(input: &str) -> Statement {
    let program = parse_program(input).expect("input should parse");

    assert_eq!(program.statements.len(), 1);

    program.statements.into_iter().next().unwrap()
}

fn parse_fail(input: &str) -> ParseError {
    match parse_program(input) {
        Ok(program) => panic!("Expected parse error but got {program:?}"),
        Err(err) => err
    }
}

#[test]
fn test_precedence() {
    // 1 + 2 * 3 groups as 1 + (2 * 3)
    let statement = parse_statement("1 + 2 * 3;");

    let infix = match statement {
        Statement::Expression(Expression::Infix(infix)) => infix,
        statement => panic!("Expected infix expression, got {statement:?}")
    };

    assert_eq!(infix.operator, Token::Plus);
    assert!(matches!(
        *infix.right,
        Expression::Infix(ref right) if right.operator == Token::Asterisk
    ));
}

#[test]
fn test_parentheses() {
    // (1 + 2) * 3 keeps the sum on the left
    let statement = parse_statement("(1 + 2) * 3;");

    let infix = match statement {
        Statement::Expression(Expression::Infix(infix)) => infix,
        statement => panic!("Expected infix expression, got {statement:?}")
    };

    assert_eq!(infix.operator, Token::Asterisk);
    assert!(matches!(*infix.left, Expression::Nested { .. }));
}

#[test]
fn test_unary_minus() {
    let statement = parse_statement("--5;");

    let prefix = match statement {
        Statement::Expression(Expression::Prefix(prefix)) => prefix,
        statement => panic!("Expected prefix expression, got {statement:?}")
    };

    assert_eq!(prefix.operator, Token::Minus);
    assert!(matches!(
        *prefix.expression,
        Expression::Prefix(ref inner) if inner.operator == Token::Minus
    ));
}

#[test]
fn test_boolean_precedence() {
    // a > b and c < d groups both comparisons under `and`
    let statement = parse_statement("a > b and c < d;");

    let infix = match statement {
        Statement::Expression(Expression::Infix(infix)) => infix,
        statement => panic!("Expected infix expression, got {statement:?}")
    };

    assert_eq!(infix.operator, Token::And);
    assert!(matches!(
        *infix.left,
        Expression::Infix(ref left) if left.operator == Token::GreaterThan
    ));
    assert!(matches!(
        *infix.right,
        Expression::Infix(ref right) if right.operator == Token::LessThan
    ));
}

#[test]
fn test_not_precedence() {
    // not binds tighter than or: (not a) or b
    let statement = parse_statement("not a or b;");

    let infix = match statement {
        Statement::Expression(Expression::Infix(infix)) => infix,
        statement => panic!("Expected infix expression, got {statement:?}")
    };

    assert_eq!(infix.operator, Token::Or);
    assert!(matches!(
        *infix.left,
        Expression::Prefix(ref left) if left.operator == Token::Not
    ));
}

#[test]
fn test_comparison_does_not_chain() {
    let err = parse_fail("a < b < c;");

    assert!(matches!(
        err.error,
        ParseErrorType::UnexpectedToken { token: Token::LessThan, .. }
    ));
}

#[test]
fn test_assignment() {
    let statement = parse_statement("x = 42;");

    let assignment = match statement {
        Statement::Assignment(assignment) => assignment,
        statement => panic!("Expected assignment, got {statement:?}")
    };

    assert_eq!(assignment.identifier.value, "x");
}

#[test]
fn test_bare_identifier_is_expression() {
    let statement = parse_statement("x;");

    assert!(matches!(
        statement,
        Statement::Expression(Expression::Identifier(_))
    ));
}

#[test]
fn test_assignment_inside_parentheses() {
    let statement = parse_statement("x = (y = 5);");

    let assignment = match statement {
        Statement::Assignment(assignment) => assignment,
        statement => panic!("Expected assignment, got {statement:?}")
    };

    let nested = match assignment.value {
        Expression::Nested { expression, .. } => *expression,
        value => panic!("Expected nested expression, got {value:?}")
    };

    assert!(matches!(nested, Expression::Assignment(_)));
}

#[test]
fn test_newline_breaks_assignment_lookahead() {
    // the `=` must immediately follow the identifier
    let err = parse_fail("x\n= 5;");

    assert!(matches!(
        err.error,
        ParseErrorType::UnexpectedToken { token: Token::Assign, .. }
    ));
}

#[test]
fn test_print_statement() {
    let statement = parse_statement("print(x + y);");

    let print = match statement {
        Statement::Print(print) => print,
        statement => panic!("Expected print statement, got {statement:?}")
    };

    assert!(matches!(
        print.expression,
        Expression::Infix(ref infix) if infix.operator == Token::Plus
    ));
}

#[test]
fn test_multiple_statements() {
    let input = "
        x = 10;
        y = 20;
        print(x + y);
    ";

    let program = parse_program(input).unwrap();

    assert_eq!(program.statements.len(), 3);
    assert!(matches!(program.statements[0], Statement::Assignment(_)));
    assert!(matches!(program.statements[1], Statement::Assignment(_)));
    assert!(matches!(program.statements[2], Statement::Print(_)));

    assert_eq!(program.to_string(), "x = 10; y = 20; print(x + y);");
}

#[test]
fn test_empty_program() {
    let program = parse_program("\n\n").unwrap();

    assert!(program.statements.is_empty());
}

#[test]
fn test_missing_semicolon() {
    let err = parse_fail("x = 5");

    assert!(matches!(err.error, ParseErrorType::UnexpectedEof));
}

#[test]
fn test_missing_rparen() {
    let err = parse_fail("print(x;");

    assert!(matches!(
        err.error,
        ParseErrorType::UnexpectedToken { token: Token::Semicolon, .. }
    ));
}

#[test]
fn test_leading_operator() {
    let err = parse_fail("+ 5;");

    assert!(matches!(
        err.error,
        ParseErrorType::UnexpectedToken { token: Token::Plus, .. }
    ));
}

#[test]
fn test_braces_have_no_grammar() {
    // `{` and `}` are lexed but no production consumes them
    let err = parse_fail("{ x };");

    assert!(matches!(
        err.error,
        ParseErrorType::UnexpectedToken { token: Token::LBrace, .. }
    ));
}

#[test]
fn test_lex_error_surfaces_through_parse() {
    let err = parse_fail("x = 5 $;");

    assert!(matches!(err.error, ParseErrorType::LexError { .. }));
}

#[test]
fn test_parse_is_repeatable() {
    let input = "a = 1 + 2;\nprint(a);";

    let first = parse_program(input).unwrap();
    let second = parse_program(input).unwrap();

    assert_eq!(first, second);
}
