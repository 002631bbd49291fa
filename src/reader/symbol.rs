//! Character classification for token boundaries.
//!
//! Two adjacent characters belong to the same token iff they have the same kind.
//! Parentheses carry the nesting depth in their kind,
//! so that `((` or `))` always split into single-character tokens.

/// Depth assigned to the first opening parenthesis of a line.
pub const FIRST_BRACE_DEPTH: i32 = 4;

/// The kind of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Letter,
    /// ASCII digits and the decimal point.
    Digit,
    Space,
    /// Operators and any other punctuation.
    Other,
    /// A parenthesis, tagged with the depth counter at the time it was seen.
    Brace(i32),
}

impl SymbolKind {
    /// Integer code of the kind: 0-3 for the fixed kinds, the depth for braces.
    pub fn code(self) -> i32 {
        match self {
            SymbolKind::Letter => 0,
            SymbolKind::Digit => 1,
            SymbolKind::Space => 2,
            SymbolKind::Other => 3,
            SymbolKind::Brace(depth) => depth,
        }
    }
}

/// Classifies characters, tracking parenthesis depth across calls.
///
/// The depth counter is never reset: use a fresh classifier for each line,
/// and classify each character exactly once, in order.
#[derive(Debug)]
pub struct SymbolClassifier {
    depth: i32,
}

impl Default for SymbolClassifier {
    fn default() -> Self {
        SymbolClassifier {
            depth: FIRST_BRACE_DEPTH,
        }
    }
}

impl SymbolClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the depth counter.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn kind(&mut self, symbol: char) -> SymbolKind {
        match symbol {
            '(' => {
                let kind = SymbolKind::Brace(self.depth);
                self.depth += 1;
                kind
            }
            ')' => {
                let kind = SymbolKind::Brace(self.depth);
                self.depth -= 1;
                kind
            }
            c if c.is_ascii_digit() || c == '.' => SymbolKind::Digit,
            c if c.is_alphabetic() => SymbolKind::Letter,
            c if c.is_whitespace() => SymbolKind::Space,
            _ => SymbolKind::Other,
        }
    }
}
