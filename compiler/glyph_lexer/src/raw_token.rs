//! Raw token definition.
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! literal cooking and final token conversion.

use logos::Logos;

/// Raw token from logos (before cooking).
///
/// Glyph tokens are maximal runs of non-whitespace bytes. The catch-all
/// `Word` regex carries the lowest priority so the fixed words and the
/// integer regex win ties, while longest-match keeps `dupp` or `1st`
/// a single `Word`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")] // Whitespace separates words and is skipped
pub(crate) enum RawToken {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("=")]
    Equal,
    #[token(">")]
    Greater,
    #[token("<")]
    Less,
    #[token(".")]
    Dump,
    #[token("dup")]
    Dup,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("end")]
    End,
    #[token("while")]
    While,
    #[token("do")]
    Do,

    /// Integer literal. The value is cooked in `convert`; literals that
    /// do not fit a 64-bit machine word downgrade to `Word`.
    #[regex(r"-?[0-9]+", priority = 3)]
    Int,

    /// Any other run of non-whitespace bytes.
    #[regex(r"[^ \t\r\n]+", priority = 1)]
    Word,
}
