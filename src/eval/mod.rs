//! Arithmetic evaluator.
//!
//! Parsing produces a [Value]: a deferred computation.
//! No arithmetic happens until [Value::get] is called on the final result.

use std::fmt;
use std::io::ErrorKind;

use crate::reader::{self, ReadErr};

pub mod syntax;


pub use syntax::{BraceSyntax, ExpressionSyntax, GlobalSyntax, NumberSyntax, Syntax};

/// Error from evaluating a line.
///
/// All of these are fatal: evaluation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Read(#[from] ReadErr),
    #[error("malformed number {0:?}")]
    MalformedNumber(String),
    #[error("expected a number or \"(\", found {0:?}")]
    UnexpectedToken(String),
    #[error("expected \"(\" to open a group, found {0:?}")]
    ExpectedOpenBrace(String),
    #[error("unexpected end of input: unclosed parenthesis")]
    UnexpectedEnd,
    #[error("unexpected {0:?} after the end of the expression")]
    TrailingToken(String),
}

pub type EvalResult<T> = Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        std::io::Error::new(ErrorKind::InvalidInput, value)
    }
}

/// The four binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

/// Operator symbols, as they appear in tokens.
const OPERATORS: &[(&str, Operator)] = &[
    ("+", Operator::Add),
    ("-", Operator::Sub),
    ("*", Operator::Mul),
    ("/", Operator::Div),
];

impl Operator {
    /// The operator spelled by the token, if any.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, op)| *op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => a / b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A deferred arithmetic result.
///
/// Building a Value never computes anything;
/// [Value::get] walks the operands and applies the operators.
/// A Value is pure: `get` may be called any number of times.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Constant(f64),
    Binary {
        op: Operator,
        lhs: Box<Value>,
        rhs: Box<Value>,
    },
}

impl Default for Value {
    fn default() -> Self {
        Value::Constant(0.0)
    }
}

impl Value {
    pub fn constant(v: f64) -> Self {
        Value::Constant(v)
    }

    /// A value that applies `op` to the two operands when read.
    pub fn binary(op: Operator, lhs: Value, rhs: Value) -> Self {
        Value::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Compute the value.
    ///
    /// A flat group builds one level per operator, so the walk uses a work list
    /// rather than the call stack.
    pub fn get(&self) -> f64 {
        enum Step<'v> {
            Eval(&'v Value),
            Apply(Operator),
        }

        let mut steps = vec![Step::Eval(self)];
        let mut results: Vec<f64> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Eval(Value::Constant(v)) => results.push(*v),
                Step::Eval(Value::Binary { op, lhs, rhs }) => {
                    steps.push(Step::Apply(*op));
                    steps.push(Step::Eval(rhs));
                    steps.push(Step::Eval(lhs));
                }
                Step::Apply(op) => {
                    let (Some(b), Some(a)) = (results.pop(), results.pop()) else {
                        unreachable!("operands are computed before their operator");
                    };
                    results.push(op.apply(a, b));
                }
            }
        }
        results.pop().unwrap_or_default()
    }
}

/// Unlinks operands one at a time, so dropping a long chain doesn't recurse.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Value::Binary { lhs, rhs, .. } = self {
            pending.push(std::mem::take(&mut **lhs));
            pending.push(std::mem::take(&mut **rhs));
        }
        while let Some(mut value) = pending.pop() {
            if let Value::Binary { lhs, rhs, .. } = &mut value {
                pending.push(std::mem::take(&mut **lhs));
                pending.push(std::mem::take(&mut **rhs));
            }
        }
    }
}

/// Renders the pending computation, fully parenthesized.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'v> {
            Value(&'v Value),
            Text(&'static str),
        }

        let mut pieces = vec![Piece::Value(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Value(Value::Constant(v)) => write!(f, "{}", v)?,
                Piece::Value(Value::Binary { op, lhs, rhs }) => {
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Value(rhs));
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Text(op.symbol()));
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Value(lhs));
                    pieces.push(Piece::Text("("));
                }
            }
        }
        Ok(())
    }
}

/// Evaluate a single line.
pub fn evaluate(line: &str) -> EvalResult<f64> {
    let mut stream = reader::read(line)?;
    tracing::debug!("tokens: {:?}", stream.remaining());
    let value = GlobalSyntax.value(&mut stream)?;
    tracing::debug!("deferred value: {}", value);
    Ok(value.get())
}
