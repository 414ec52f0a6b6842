//! Debug commands: `parse` and `lex` for inspecting toolchain internals.

use super::read_file;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let tokens = glyph_lexer::lex(&source);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in tokens.iter() {
        println!("  {:?} @ {}", token.kind, token.span);
    }
}

/// Parse a file and display the resolved op list.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let output = glyph_parse::parse(&glyph_lexer::lex(&source), &source);

    println!("Parse result for '{path}':");
    println!("  Ops: {}", output.program.len());
    println!("  Errors: {}", output.errors.len());

    if !output.program.is_empty() {
        println!();
        println!("Ops:");
        for (ip, op) in output.program.ops.iter().enumerate() {
            println!("  {ip:>3}: {op:?}");
        }
    }

    if !output.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &output.errors {
            println!("  {}: {}", error.span(), error);
        }
    }
}
