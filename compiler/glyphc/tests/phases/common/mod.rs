//! Shared helpers for phase tests.

use glyph_parse::ParseOutput;

/// Lex and parse, asserting the source is well-formed.
pub fn frontend(source: &str) -> ParseOutput {
    let output = glyph_parse::parse(&glyph_lexer::lex(source), source);
    assert!(!output.has_errors(), "parse errors in {source:?}");
    output
}

/// Run a program through the simulator, returning its dump output.
pub fn run(source: &str) -> String {
    let output = frontend(source);
    let mut sink = Vec::new();
    glyph_eval::simulate_program(&output.program, &mut sink).unwrap();
    String::from_utf8(sink).unwrap()
}
