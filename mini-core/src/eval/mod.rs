pub mod error;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Value, FALSE, TRUE},
    lexer::prelude::Token,
    parser::prelude::{
        parse_program, parse_program_from_stream, Assignment, Expression,
        Infix, Prefix, Primitive, PrintStatement, Program, Statement
    },
    utils::prelude::Error
};

use self::error::{RuntimeError, RuntimeErrorType};

#[derive(Default, Debug)]
pub struct Evaluator {
    pub env: Environment,
    pub output: Vec<Value>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            output: vec![],
        }
    }

    pub fn with_env(env: Environment) -> Self {
        Self {
            env,
            output: vec![],
        }
    }

    pub fn eval(&mut self, program: &Program) -> Result<Option<Value>, RuntimeError> {
        let mut result = None;

        for statement in &program.statements {
            result = self.eval_statement(statement)?;
        }

        Ok(result)
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Option<Value>, RuntimeError> {
        match statement {
            Statement::Print(print) => {
                self.eval_print(print)?;

                Ok(None)
            },
            Statement::Assignment(assignment) => {
                Ok(Some(self.eval_assignment(assignment)?))
            },
            Statement::Expression(expression) => {
                Ok(Some(self.eval_expression(expression)?))
            }
        }
    }

    fn eval_print(&mut self, print: &PrintStatement) -> Result<(), RuntimeError> {
        let value = self.eval_expression(&print.expression)?;

        println!("{value}");
        self.output.push(value);

        Ok(())
    }

    fn eval_assignment(&mut self, assignment: &Assignment) -> Result<Value, RuntimeError> {
        let value = self.eval_expression(&assignment.value)?;

        self.env.set(assignment.identifier.value.clone(), value);

        Ok(value)
    }

    fn eval_expression(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Identifier(ident) => match self.env.get(&ident.value) {
                Some(value) => Ok(*value),
                None => Err(RuntimeError {
                    error: RuntimeErrorType::UndefinedVariable {
                        name: ident.value.clone()
                    },
                    location: ident.location
                })
            },
            Expression::Primitive(primitive) => match primitive {
                Primitive::Int { value, .. } => Ok(Value::Integer { value: *value })
            },
            Expression::Infix(infix) => self.eval_infix(infix),
            Expression::Prefix(prefix) => self.eval_prefix(prefix),
            Expression::Assignment(assignment) => self.eval_assignment(assignment),
            Expression::Nested { expression, .. } => self.eval_expression(expression)
        }
    }

    fn eval_infix(&mut self, infix: &Infix) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&infix.left)?;

        // and/or return the deciding operand; the skipped side is never
        // evaluated, so its side effects do not happen
        match infix.operator {
            Token::And => {
                return if !left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval_expression(&infix.right)
                };
            },
            Token::Or => {
                return if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval_expression(&infix.right)
                };
            },
            _ => {}
        }

        let right = self.eval_expression(&infix.right)?;

        let (left, right) = (left.as_int(), right.as_int());

        match infix.operator {
            Token::Plus => Ok(Value::Integer { value: left + right }),
            Token::Minus => Ok(Value::Integer { value: left - right }),
            Token::Asterisk => Ok(Value::Integer { value: left * right }),
            Token::Slash => {
                if right == 0 {
                    return Err(RuntimeError {
                        error: RuntimeErrorType::DivisionByZero,
                        location: infix.location
                    });
                }

                Ok(Value::Integer { value: floor_div(left, right) })
            },
            Token::Equal => Ok(Value::Boolean { value: left == right }),
            Token::NotEqual => Ok(Value::Boolean { value: left != right }),
            Token::LessThan => Ok(Value::Boolean { value: left < right }),
            Token::LessThanOrEqual => Ok(Value::Boolean { value: left <= right }),
            Token::GreaterThan => Ok(Value::Boolean { value: left > right }),
            Token::GreaterThanOrEqual => Ok(Value::Boolean { value: left >= right }),
            // unreachable with a correct parser
            ref token => Err(RuntimeError {
                error: RuntimeErrorType::InvalidOperator { token: token.clone() },
                location: infix.location
            })
        }
    }

    fn eval_prefix(&mut self, prefix: &Prefix) -> Result<Value, RuntimeError> {
        let value = self.eval_expression(&prefix.expression)?;

        match prefix.operator {
            Token::Minus => Ok(Value::Integer { value: -value.as_int() }),
            // `not` always normalizes to a boolean
            Token::Not => Ok(if value.is_truthy() { FALSE } else { TRUE }),
            ref token => Err(RuntimeError {
                error: RuntimeErrorType::InvalidOperator { token: token.clone() },
                location: prefix.location
            })
        }
    }
}

// rounds toward negative infinity: -7 / 2 == -4
fn floor_div(left: i64, right: i64) -> i64 {
    let quotient = left / right;

    if left % right != 0 && (left < 0) != (right < 0) {
        quotient - 1
    } else {
        quotient
    }
}

pub fn interpret(src: &str, evaluator: &mut Evaluator) -> Result<Option<Value>, Error> {
    let program = match parse_program(src) {
        Ok(program) => program,
        Err(error) => {
            return Err(Error::Parse {
                path: PathBuf::new(),
                src: src.to_string(),
                error
            })
        }
    };

    evaluator.eval(&program).map_err(|error| Error::Runtime {
        path: PathBuf::new(),
        src: src.to_string(),
        error
    })
}

pub fn run_file(path: PathBuf, evaluator: &mut Evaluator) -> Result<Option<Value>, Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            return Err(Error::StdIo { err: err.kind() })
        }
    };

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let stream = reader.chars()
        .map(|c| {
            let c = c.unwrap();
            src.push(c);
            c
        });

    let program = match parse_program_from_stream(stream) {
        Ok(program) => program,
        Err(error) => {
            return Err(Error::Parse { path, src, error })
        }
    };

    evaluator.eval(&program).map_err(|error| Error::Runtime {
        path,
        src,
        error
    })
}
