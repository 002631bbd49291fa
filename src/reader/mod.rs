//! Support for reading arithmetic expressions from a line of text.
//!
//! Reading happens in two layers:
//! - [symbol] classifies single characters into kinds.
//! - [token] groups runs of same-kind characters into tokens,
//!   and hands them out through a [stream::TokenStream].

pub mod stream;
pub mod symbol;
pub mod token;

pub use stream::{Append, BufferedTokenStream, Prepend, TokenStream};
pub use symbol::{SymbolClassifier, SymbolKind};
pub use token::{read, tokenize, Token};

/// Error type if a line cannot be read into tokens.
///
/// Every non-empty line tokenizes; classification never fails.
/// Malformed tokens are only detected once the grammar tries to use them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadErr {
    #[error("empty input line")]
    Empty,
}

/// The main result type for this module.
pub type ReadResult<T> = Result<T, ReadErr>;
