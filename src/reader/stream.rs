//! Pull-based token streams.
//!
//! A stream hands out tokens one at a time, and `None` once it is exhausted.
//! Streams compose: [Prepend] injects tokens ahead of a stream
//! (which is how the grammar "un-reads" a token it has looked at),
//! and [Append] injects tokens after a stream ends.
//! Neither copies the tokens remaining in the stream it wraps.

use smallvec::SmallVec;

use super::token::Token;

/// Injected tokens: a push-back or a terminator, so usually one.
type Injected<'a> = SmallVec<[Token<'a>; 2]>;

/// A forward-only source of tokens.
///
/// Once a stream returns `None`, every later call returns `None` too.
pub trait TokenStream<'a> {
    fn next_token(&mut self) -> Option<Token<'a>>;

    /// Return the given tokens, in order, before the rest of this stream.
    fn prepend<I>(self, tokens: I) -> Prepend<'a, Self>
    where
        Self: Sized,
        I: IntoIterator<Item = Token<'a>>,
    {
        Prepend::new(self, tokens)
    }

    /// Return the given tokens, in order, after this stream is exhausted.
    fn append<I>(self, tokens: I) -> Append<'a, Self>
    where
        Self: Sized,
        I: IntoIterator<Item = Token<'a>>,
    {
        Append::new(self, tokens)
    }
}

/// A borrowed stream is a stream; decorators can wrap `&mut dyn TokenStream`.
impl<'a, S> TokenStream<'a> for &mut S
where
    S: TokenStream<'a> + ?Sized,
{
    fn next_token(&mut self) -> Option<Token<'a>> {
        (**self).next_token()
    }
}

/// A stream over a fixed list of tokens.
#[derive(Debug, Clone, Default)]
pub struct BufferedTokenStream<'a> {
    buffer: Vec<Token<'a>>,
    position: usize,
}

impl<'a> BufferedTokenStream<'a> {
    pub fn new(buffer: Vec<Token<'a>>) -> Self {
        BufferedTokenStream {
            buffer,
            position: 0,
        }
    }

    /// Tokens not yet handed out.
    pub fn remaining(&self) -> &[Token<'a>] {
        &self.buffer[self.position..]
    }
}

impl<'a> TokenStream<'a> for BufferedTokenStream<'a> {
    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.buffer.get(self.position).copied()?;
        self.position += 1;
        Some(token)
    }
}

impl<'a> FromIterator<Token<'a>> for BufferedTokenStream<'a> {
    fn from_iter<T: IntoIterator<Item = Token<'a>>>(iter: T) -> Self {
        BufferedTokenStream::new(iter.into_iter().collect())
    }
}

/// Injects tokens ahead of another stream.
#[derive(Debug)]
pub struct Prepend<'a, S> {
    base: S,
    tokens: Injected<'a>,
    position: usize,
}

impl<'a, S> Prepend<'a, S>
where
    S: TokenStream<'a>,
{
    pub fn new(base: S, tokens: impl IntoIterator<Item = Token<'a>>) -> Self {
        Prepend {
            base,
            tokens: tokens.into_iter().collect(),
            position: 0,
        }
    }
}

impl<'a, S> TokenStream<'a> for Prepend<'a, S>
where
    S: TokenStream<'a>,
{
    fn next_token(&mut self) -> Option<Token<'a>> {
        match self.tokens.get(self.position) {
            Some(&token) => {
                self.position += 1;
                Some(token)
            }
            None => self.base.next_token(),
        }
    }
}

/// Injects tokens after another stream ends.
#[derive(Debug)]
pub struct Append<'a, S> {
    base: S,
    tokens: Injected<'a>,
    position: usize,
    finished: bool,
}

impl<'a, S> Append<'a, S>
where
    S: TokenStream<'a>,
{
    pub fn new(base: S, tokens: impl IntoIterator<Item = Token<'a>>) -> Self {
        Append {
            base,
            tokens: tokens.into_iter().collect(),
            position: 0,
            finished: false,
        }
    }
}

impl<'a, S> TokenStream<'a> for Append<'a, S>
where
    S: TokenStream<'a>,
{
    fn next_token(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        if let Some(token) = self.base.next_token() {
            return Some(token);
        }
        let token = self.tokens.get(self.position).copied();
        match token {
            Some(_) => self.position += 1,
            None => self.finished = true,
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffered<'a>(tokens: &[&'a str]) -> BufferedTokenStream<'a> {
        tokens.iter().copied().map(Token::new).collect()
    }

    /// Read every token from the stream, then check the end is stable.
    fn drain<'a>(mut stream: impl TokenStream<'a>) -> Vec<&'a str> {
        let mut result = Vec::new();
        while let Some(token) = stream.next_token() {
            result.push(token.as_str());
        }
        for _ in 0..3 {
            assert_eq!(stream.next_token(), None, "stream resumed after its end");
        }
        result
    }

    fn tokens<'a>(strs: &[&'a str]) -> Vec<Token<'a>> {
        strs.iter().copied().map(Token::new).collect()
    }

    #[test]
    fn buffered_in_order() {
        assert_eq!(drain(buffered(&["1", "+", "2"])), vec!["1", "+", "2"]);
    }

    #[test]
    fn buffered_empty() {
        assert!(drain(buffered(&[])).is_empty());
    }

    #[test]
    fn buffered_remaining() {
        let mut stream = buffered(&["(", "1", ")"]);
        stream.next_token();
        assert_eq!(stream.remaining(), &tokens(&["1", ")"])[..]);
    }

    #[test]
    fn prepend_comes_first() {
        let stream = buffered(&["1", "+", "2"]).prepend(tokens(&["(", "("]));
        assert_eq!(drain(stream), vec!["(", "(", "1", "+", "2"]);
    }

    #[test]
    fn append_comes_last() {
        let stream = buffered(&["1", "+", "2"]).append(tokens(&[")", ")"]));
        assert_eq!(drain(stream), vec!["1", "+", "2", ")", ")"]);
    }

    #[test]
    fn empty_decorators_are_transparent() {
        let stream = buffered(&["3", "*", "4"])
            .prepend(Vec::new())
            .append(Vec::new());
        assert_eq!(drain(stream), vec!["3", "*", "4"]);
    }

    #[test]
    fn decorators_on_empty_base() {
        assert_eq!(drain(buffered(&[]).prepend(tokens(&["("]))), vec!["("]);
        assert_eq!(drain(buffered(&[]).append(tokens(&[")"]))), vec![")"]);
    }

    #[test]
    fn decorators_stack() {
        let stream = buffered(&["1"])
            .prepend(tokens(&["("]))
            .append(tokens(&[")"]))
            .prepend(tokens(&["("]))
            .append(tokens(&[")"]));
        assert_eq!(drain(stream), vec!["(", "(", "1", ")", ")"]);
    }

    #[test]
    fn push_back_through_borrow() {
        let mut base = buffered(&["12", "+", "3"]);
        let first = base.next_token().expect("missing first token");
        {
            // Un-read the first token, and read it again through the decorator.
            let mut pushed = (&mut base).prepend([first]);
            assert_eq!(pushed.next_token(), Some(Token::new("12")));
        }
        assert_eq!(drain(&mut base), vec!["+", "3"]);
    }

    #[test]
    fn injected_tokens_stay_inline() {
        let mut base = buffered(&["+", "3"]);
        let pushed = (&mut base).prepend([Token::new("12")]);
        assert!(!pushed.tokens.spilled());
        let wrapped = pushed.append([Token::CLOSE]);
        assert!(!wrapped.tokens.spilled());
        assert_eq!(drain(wrapped), vec!["12", "+", "3", ")"]);
    }

    #[test]
    fn many_injected_tokens() {
        let stream = buffered(&["x"]).prepend(tokens(&["(", "(", "(", "("]));
        assert_eq!(drain(stream), vec!["(", "(", "(", "(", "x"]);
    }

    #[test]
    fn wraps_trait_objects() {
        let mut base = buffered(&["2"]);
        let dynamic: &mut dyn TokenStream<'_> = &mut base;
        let stream = dynamic.prepend([Token::OPEN]).append([Token::CLOSE]);
        assert_eq!(drain(stream), vec!["(", "2", ")"]);
    }
}
