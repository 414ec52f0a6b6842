//! Token conversion.
//!
//! Converts raw logos tokens to final `TokenKind`, cooking integer
//! literals into 64-bit machine words.

use glyph_ir::TokenKind;

use crate::raw_token::RawToken;

/// Convert a raw token to a `TokenKind`.
pub(crate) fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Int => cook_int(slice),
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Equal => TokenKind::Equal,
        RawToken::Greater => TokenKind::Greater,
        RawToken::Less => TokenKind::Less,
        RawToken::Dump => TokenKind::Dump,
        RawToken::Dup => TokenKind::Dup,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::End => TokenKind::End,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::Word => TokenKind::Word,
    }
}

/// Cook an integer literal into a machine word.
///
/// Accepts `i64::MIN..=u64::MAX`; negative literals wrap to their
/// two's-complement representation. A literal outside that range
/// downgrades to `Word` so the parser can report it with a span.
fn cook_int(slice: &str) -> TokenKind {
    if slice.starts_with('-') {
        match slice.parse::<i64>() {
            Ok(value) => TokenKind::Int(value as u64),
            Err(_) => TokenKind::Word,
        }
    } else {
        match slice.parse::<u64>() {
            Ok(value) => TokenKind::Int(value),
            Err(_) => TokenKind::Word,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cook_int_positive() {
        assert_eq!(cook_int("0"), TokenKind::Int(0));
        assert_eq!(cook_int("42"), TokenKind::Int(42));
        assert_eq!(cook_int("18446744073709551615"), TokenKind::Int(u64::MAX));
    }

    #[test]
    fn test_cook_int_negative_wraps() {
        assert_eq!(cook_int("-1"), TokenKind::Int(u64::MAX));
        assert_eq!(cook_int("-5"), TokenKind::Int(u64::MAX - 4));
        assert_eq!(
            cook_int("-9223372036854775808"),
            TokenKind::Int(i64::MIN as u64)
        );
    }

    #[test]
    fn test_cook_int_out_of_range_downgrades() {
        assert_eq!(cook_int("18446744073709551616"), TokenKind::Word);
        assert_eq!(cook_int("-9223372036854775809"), TokenKind::Word);
        assert_eq!(cook_int("99999999999999999999"), TokenKind::Word);
    }
}
