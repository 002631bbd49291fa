//! Module for splitting a line into tokens.

use std::fmt;

use super::stream::BufferedTokenStream;
use super::symbol::SymbolClassifier;
use super::{ReadErr, ReadResult};

/// A token: a slice of the input line.
///
/// Tokens carry no type tag; the grammar decides what a token means
/// when it looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
    pub const OPEN: Token<'static> = Token("(");
    pub const CLOSE: Token<'static> = Token(")");

    pub fn new(text: &'a str) -> Self {
        Token(text)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Does this token start with an ASCII digit, i.e. should it be read as a number?
    pub fn is_number(&self) -> bool {
        self.0.starts_with(|c: char| c.is_ascii_digit())
    }

    pub fn is_open(&self) -> bool {
        self.0 == "("
    }

    pub fn is_close(&self) -> bool {
        self.0 == ")"
    }

    fn is_blank(&self) -> bool {
        self.0.chars().all(char::is_whitespace)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Split the line into its constituent tokens.
///
/// A new token starts wherever the kind of a character differs from the kind
/// of the character before it. Whitespace-only tokens are dropped.
pub fn tokenize(line: &str) -> ReadResult<Vec<Token<'_>>> {
    // A classifier per line: its brace depth must start fresh.
    let mut classifier = SymbolClassifier::new();
    let mut tokens = Vec::new();

    let mut chars = line.char_indices();
    let Some((_, first)) = chars.next() else {
        return Err(ReadErr::Empty);
    };
    let mut start = 0;
    let mut last_kind = classifier.kind(first);

    for (position, ch) in chars {
        let kind = classifier.kind(ch);
        if kind != last_kind {
            tokens.push(Token(&line[start..position]));
            start = position;
        }
        last_kind = kind;
    }
    tokens.push(Token(&line[start..]));

    tokens.retain(|token| !token.is_blank());
    tracing::trace!("tokenized {:?} into {} tokens", line, tokens.len());
    Ok(tokens)
}

/// Read the line into a stream of tokens.
pub fn read(line: &str) -> ReadResult<BufferedTokenStream<'_>> {
    Ok(BufferedTokenStream::new(tokenize(line)?))
}
