//! Token types for the Glyph lexer.
//!
//! Glyph's lexical grammar is deliberately small: words are maximal runs
//! of non-whitespace bytes, and every word is either a fixed operator,
//! an integer literal, or unknown.

use super::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Glyph.
///
/// Integer literals are cooked during lexing: the value is stored as a
/// 64-bit machine word, with negative literals wrapped to two's
/// complement.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Integer literal: `42`, `-17` (stored as a machine word)
    Int(u64),

    Plus,    // +
    Minus,   // -
    Equal,   // =
    Greater, // >
    Less,    // <
    Dump,    // .
    Dup,     // dup
    If,      // if
    Else,    // else
    End,     // end
    While,   // while
    Do,      // do

    /// A word that is not part of the language. The text is recovered
    /// from the span when reporting the error.
    Word,

    Eof,
}

impl TokenKind {
    /// Get a display name for the token.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Equal => "=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::Dump => ".",
            TokenKind::Dup => "dup",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::End => "end",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Word => "word",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "Int({n})"),
            TokenKind::Word => write!(f, "Word"),
            TokenKind::Eof => write!(f, "Eof"),
            _ => write!(f, "`{}`", self.display_name()),
        }
    }
}

/// Lexer output: a flat list of tokens ending in `Eof`.
#[derive(Clone, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a new token list with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Append a token.
    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Get the number of tokens (including the trailing `Eof`).
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Get a slice of all tokens.
    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate over tokens.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Token;
    crate::static_assert_size!(Token, 24);
}
