//! Calculator for fully-parenthesized arithmetic.
//!
//! A line like `((1+2)*(3-1))` is split into tokens by the [reader],
//! and parsed into a deferred value by the grammar in [eval].
//! Outer parentheses may be left off: `3 + 4` reads as `(3 + 4)`.
//! Within a group, operators apply left to right; there is no precedence.

use std::io::{BufRead, Write};

pub mod eval;
pub mod reader;

pub use eval::{evaluate, Error, Operator, Value};

/// Read one line from `input`, evaluate it, and print the result to `output`.
///
/// On an evaluation error, the message goes to `errors`,
/// and the error is returned as an `InvalidInput` I/O error.
pub fn repl(
    input: &mut impl BufRead,
    output: &mut impl Write,
    errors: &mut impl Write,
) -> std::io::Result<()> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']);

    match evaluate(line) {
        Ok(v) => writeln!(output, "{}", v),
        Err(e) => {
            writeln!(errors, "error: {}", e)?;
            Err(e.into())
        }
    }
}
