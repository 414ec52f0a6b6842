//! Lexer and parser phase tests.

use glyph_lexer::lex;
use glyph_parse::parse;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_errors_are_collected_not_fatal() {
    let source = "1 2 dupp + qqq .";
    let output = parse(&lex(source), source);
    assert_eq!(output.errors.len(), 2);
    // The well-formed part of the program still parses
    assert_eq!(output.program.len(), 4);
}

#[test]
fn test_errors_from_every_phase_accumulate() {
    // An unknown word, a block error, and an unclosed opener in one file
    let source = "swap else 1 if 2";
    let output = parse(&lex(source), source);
    assert_eq!(output.errors.len(), 3);
}

#[test]
fn test_well_formed_file_resolves_every_target() {
    let source = "1 if 2 . else 3 . end while 1 do . end";
    let output = parse(&lex(source), source);
    assert!(!output.has_errors());
    for op in &output.program.ops {
        assert_ne!(op.kind.jump_target(), Some(glyph_ir::UNRESOLVED_TARGET));
    }
}
