use crate::{
    environment::prelude::{Environment, Value, FALSE, TRUE},
    parser::prelude::parse_program,
};

use super::error::RuntimeErrorType;
use super::Evaluator;

fn eval_program(input: &str) -> (Evaluator, Option<Value>) {
    let program = parse_program(input).expect("input should parse");

    let mut evaluator = Evaluator::new();
    let result = evaluator.eval(&program).expect("input should evaluate");

    (evaluator, result)
}

fn eval_result(input: &str) -> Value {
    let (_, result) = eval_program(input);

    result.expect("input should produce a value")
}

fn eval_fail(input: &str) -> RuntimeErrorType {
    let program = parse_program(input).expect("input should parse");

    let mut evaluator = Evaluator::new();

    match evaluator.eval(&program) {
        Ok(result) => panic!("Expected runtime error but got {result:?}"),
        Err(err) => err.error
    }
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval_result("2 + 3;"), Value::Integer { value: 5 });
    assert_eq!(eval_result("10 - 4;"), Value::Integer { value: 6 });
    assert_eq!(eval_result("6 * 7;"), Value::Integer { value: 42 });
    assert_eq!(eval_result("1 + 2 * 3;"), Value::Integer { value: 7 });
    assert_eq!(eval_result("(1 + 2) * 3;"), Value::Integer { value: 9 });
}

#[test]
fn test_floor_division() {
    // rounds toward negative infinity, not toward zero
    assert_eq!(eval_result("7 / 2;"), Value::Integer { value: 3 });
    assert_eq!(eval_result("-7 / 2;"), Value::Integer { value: -4 });
    assert_eq!(eval_result("7 / -2;"), Value::Integer { value: -4 });
    assert_eq!(eval_result("-7 / -2;"), Value::Integer { value: 3 });
    assert_eq!(eval_result("6 / 2;"), Value::Integer { value: 3 });
    assert_eq!(eval_result("-6 / 2;"), Value::Integer { value: -3 });
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval_fail("1 / 0;"), RuntimeErrorType::DivisionByZero);
    assert_eq!(eval_fail("x = 5; x / (x - x);"), RuntimeErrorType::DivisionByZero);
}

#[test]
fn test_unary_minus() {
    assert_eq!(eval_result("-5;"), Value::Integer { value: -5 });
    assert_eq!(eval_result("--5;"), Value::Integer { value: 5 });
    assert_eq!(eval_result("2 - -3;"), Value::Integer { value: 5 });
}

#[test]
fn test_comparisons() {
    assert_eq!(eval_result("1 < 2;"), TRUE);
    assert_eq!(eval_result("2 < 1;"), FALSE);
    assert_eq!(eval_result("2 <= 2;"), TRUE);
    assert_eq!(eval_result("3 > 2;"), TRUE);
    assert_eq!(eval_result("2 >= 3;"), FALSE);
    assert_eq!(eval_result("1 == 1;"), TRUE);
    assert_eq!(eval_result("1 != 1;"), FALSE);
}

#[test]
fn test_short_circuit_values() {
    // and/or hand back the deciding operand unchanged
    assert_eq!(eval_result("0 and 5;"), Value::Integer { value: 0 });
    assert_eq!(eval_result("2 and 3;"), Value::Integer { value: 3 });
    assert_eq!(eval_result("1 or 5;"), Value::Integer { value: 1 });
    assert_eq!(eval_result("0 or 5;"), Value::Integer { value: 5 });
}

#[test]
fn test_short_circuit_skips_side_effects() {
    // the skipped operand is an assignment that must not run
    let (evaluator, _) = eval_program("x = 1; 0 and (x = 99);");

    assert_eq!(evaluator.env.get("x"), Some(&Value::Integer { value: 1 }));

    let (evaluator, _) = eval_program("y = 1; 1 or (y = 99);");

    assert_eq!(evaluator.env.get("y"), Some(&Value::Integer { value: 1 }));

    let (evaluator, _) = eval_program("z = 1; 1 and (z = 99);");

    assert_eq!(evaluator.env.get("z"), Some(&Value::Integer { value: 99 }));
}

#[test]
fn test_not_yields_boolean() {
    assert_eq!(eval_result("not 5;"), FALSE);
    assert_eq!(eval_result("not 0;"), TRUE);
    assert_eq!(eval_result("not not 7;"), TRUE);
}

#[test]
fn test_boolean_arithmetic() {
    // comparison results count as 0 and 1 in arithmetic
    assert_eq!(eval_result("(1 < 2) + 1;"), Value::Integer { value: 2 });
    assert_eq!(eval_result("(1 == 1) == 1;"), TRUE);
}

#[test]
fn test_assignment_is_an_expression() {
    let (evaluator, result) = eval_program("x = (y = 5);");

    assert_eq!(result, Some(Value::Integer { value: 5 }));
    assert_eq!(evaluator.env.get("x"), Some(&Value::Integer { value: 5 }));
    assert_eq!(evaluator.env.get("y"), Some(&Value::Integer { value: 5 }));
}

#[test]
fn test_reassignment() {
    let (evaluator, _) = eval_program("x = 10; x = 20;");

    assert_eq!(evaluator.env.get("x"), Some(&Value::Integer { value: 20 }));
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        eval_fail("x + 1;"),
        RuntimeErrorType::UndefinedVariable { name: String::from("x") }
    );
}

#[test]
fn test_print_output() {
    let (evaluator, result) = eval_program("print(42);");

    assert_eq!(result, None);
    assert_eq!(evaluator.output, vec![Value::Integer { value: 42 }]);
}

#[test]
fn test_multiple_prints() {
    let (evaluator, _) = eval_program("print(1); print(2); print(3);");

    assert_eq!(evaluator.output, vec![
        Value::Integer { value: 1 },
        Value::Integer { value: 2 },
        Value::Integer { value: 3 },
    ]);
}

#[test]
fn test_conditional_expression() {
    let (evaluator, _) = eval_program("x = 5; r = x > 0 and x < 10; print(r);");

    assert_eq!(evaluator.output, vec![TRUE]);
}

#[test]
fn test_program_result_is_last_statement() {
    assert_eq!(eval_result("1; 2; 3;"), Value::Integer { value: 3 });

    let (_, result) = eval_program("");
    assert_eq!(result, None);
}

#[test]
fn test_full_program() {
    let input = "
        a = 0;
        b = 1;
        c = a + b;
        print(c);
    ";

    let (evaluator, _) = eval_program(input);

    assert_eq!(evaluator.output, vec![Value::Integer { value: 1 }]);
    assert_eq!(evaluator.env.get("a"), Some(&Value::Integer { value: 0 }));
    assert_eq!(evaluator.env.get("b"), Some(&Value::Integer { value: 1 }));
    assert_eq!(evaluator.env.get("c"), Some(&Value::Integer { value: 1 }));
}

#[test]
fn test_evaluator_reuse_keeps_state() {
    let mut evaluator = Evaluator::new();

    let program = parse_program("x = 1;").unwrap();
    evaluator.eval(&program).unwrap();

    let program = parse_program("x = x + 1; print(x);").unwrap();
    evaluator.eval(&program).unwrap();

    assert_eq!(evaluator.env.get("x"), Some(&Value::Integer { value: 2 }));
    assert_eq!(evaluator.output, vec![Value::Integer { value: 2 }]);
}

#[test]
fn test_error_rendering() {
    let mut evaluator = Evaluator::new();

    let err = super::interpret("x = ;", &mut evaluator).unwrap_err();
    assert!(err.pretty_string().contains("Syntax error"));

    let err = super::interpret("1 / 0;", &mut evaluator).unwrap_err();
    assert!(err.pretty_string().contains("Runtime error"));
}

#[test]
fn test_seeded_environment() {
    let mut env = Environment::new();
    env.set(String::from("x"), Value::Integer { value: 5 });

    let mut evaluator = Evaluator::with_env(env);

    let program = parse_program("y = x + 10;").unwrap();
    evaluator.eval(&program).unwrap();

    assert_eq!(evaluator.env.get("y"), Some(&Value::Integer { value: 15 }));
}
