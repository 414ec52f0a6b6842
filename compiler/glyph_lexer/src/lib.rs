//! Lexer for Glyph using logos.
//!
//! Produces a [`TokenList`] terminated by `Eof`. The lexical grammar is
//! deliberately small: whitespace separates words, every word is a fixed
//! operator, an integer literal, or unknown. The lexer itself never
//! fails; unknown and out-of-range words surface as `Word` tokens the
//! parser reports with a span.

use logos::Logos;

use glyph_ir::{Span, Token, TokenKind, TokenList};

mod convert;
mod raw_token;

use convert::convert_token;
use raw_token::RawToken;

/// Tokenize Glyph source into a token list ending in `Eof`.
pub fn lex(source: &str) -> TokenList {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = TokenList::new();

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let kind = match result {
            Ok(raw) => convert_token(raw, lexer.slice()),
            // The catch-all Word regex matches any non-whitespace run,
            // so logos has nothing left to reject.
            Err(()) => TokenKind::Word,
        };
        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
    tokens
}
