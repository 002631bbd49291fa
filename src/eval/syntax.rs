//! Grammar for fully-parenthesized arithmetic.
//!
//! Each syntax reads from a shared [TokenStream] and produces a [Value].
//! There is no lookahead buffer: a syntax that reads a token it can't use yet
//! pushes it back with [TokenStream::prepend], and hands the decorated stream on.
//!
//! Nesting depth lives in the call stack. [BraceSyntax] consumes one `(`,
//! and the [ExpressionSyntax] it starts consumes the matching `)`.

use super::{Error, EvalResult, Operator, Value};
use crate::reader::{Prepend, Token, TokenStream};

/// A rule of the grammar.
pub trait Syntax {
    fn value<'a>(&self, stream: &mut dyn TokenStream<'a>) -> EvalResult<Value>;
}

/// A decimal literal.
pub struct NumberSyntax;

/// The body of a group: operands and operators, up to and including the closing `)`.
pub struct ExpressionSyntax;

/// A parenthesized group: `(`, then an expression.
pub struct BraceSyntax;

/// A whole line. Outer parentheses are optional.
pub struct GlobalSyntax;

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn number() -> &'static Regex {
        static NUMBER: OnceLock<Regex> = OnceLock::new();
        NUMBER.get_or_init(|| {
            Regex::new(r"\A[0-9]+(?:[.][0-9]*)?\z").expect("could not compile regex for number")
        })
    }
}

/// Backing bytes of the `)` appended to close a whole line.
///
/// A static has an address of its own; tokens of the line point into the line.
/// Comparing addresses tells the appended `)` apart from a typed one.
static TERMINATOR_TEXT: [u8; 1] = [b')'];

fn terminator() -> Token<'static> {
    match std::str::from_utf8(&TERMINATOR_TEXT) {
        Ok(text) => Token::new(text),
        Err(_) => unreachable!("terminator text is ASCII"),
    }
}

fn is_terminator(token: Token<'_>) -> bool {
    std::ptr::eq(token.as_str(), terminator().as_str())
}

/// Un-read a token: the returned stream yields `token`, then the rest of `stream`.
fn push_back<'s, 'a>(
    stream: &'s mut dyn TokenStream<'a>,
    token: Token<'a>,
) -> Prepend<'a, &'s mut dyn TokenStream<'a>> {
    stream.prepend([token])
}

fn next_token<'a>(stream: &mut dyn TokenStream<'a>) -> EvalResult<Token<'a>> {
    stream.next_token().ok_or(Error::UnexpectedEnd)
}

/// Read one operand: a number or a parenthesized group.
fn next_value<'a>(stream: &mut dyn TokenStream<'a>) -> EvalResult<Value> {
    let token = next_token(stream)?;
    if token.is_number() {
        NumberSyntax.value(&mut push_back(stream, token))
    } else if token.is_open() {
        BraceSyntax.value(&mut push_back(stream, token))
    } else if is_terminator(token) {
        // The line ran out while an operand was still expected.
        Err(Error::UnexpectedEnd)
    } else {
        Err(Error::UnexpectedToken(token.as_str().to_owned()))
    }
}

impl Syntax for NumberSyntax {
    fn value<'a>(&self, stream: &mut dyn TokenStream<'a>) -> EvalResult<Value> {
        let token = next_token(stream)?;
        let literal = token.as_str();
        if !regex::number().is_match(literal) {
            return Err(Error::MalformedNumber(literal.to_owned()));
        }
        let v: f64 = literal
            .parse()
            .map_err(|_| Error::MalformedNumber(literal.to_owned()))?;
        tracing::trace!("number {}", v);
        Ok(Value::constant(v))
    }
}

impl Syntax for ExpressionSyntax {
    fn value<'a>(&self, stream: &mut dyn TokenStream<'a>) -> EvalResult<Value> {
        let mut value = Value::default();
        loop {
            let token = next_token(stream)?;
            if token.is_close() {
                return Ok(value);
            }
            value = match Operator::from_symbol(token.as_str()) {
                Some(op) => {
                    tracing::trace!("operator {}", op);
                    let operand = next_value(stream)?;
                    Value::binary(op, value, operand)
                }
                // Not an operator: the token starts an operand, which replaces the running value.
                None => next_value(&mut push_back(stream, token))?,
            };
        }
    }
}

impl Syntax for BraceSyntax {
    fn value<'a>(&self, stream: &mut dyn TokenStream<'a>) -> EvalResult<Value> {
        let token = next_token(stream)?;
        if !token.is_open() {
            return Err(Error::ExpectedOpenBrace(token.as_str().to_owned()));
        }
        tracing::trace!("open group");
        ExpressionSyntax.value(stream)
    }
}

impl Syntax for GlobalSyntax {
    fn value<'a>(&self, stream: &mut dyn TokenStream<'a>) -> EvalResult<Value> {
        let mut wrapped = stream
            .prepend([Token::OPEN])
            .append([terminator()]);
        let value = BraceSyntax.value(&mut wrapped)?;
        match wrapped.next_token() {
            Some(token) => Err(Error::TrailingToken(token.as_str().to_owned())),
            None => Ok(value),
        }
    }
}
