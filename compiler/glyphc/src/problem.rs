//! Conversion of phase errors into diagnostics.
//!
//! The lexer, parser and simulator report plain error values; this
//! module turns them into [`Diagnostic`]s with codes, labels and
//! suggestions for the terminal emitter.

use glyph_diagnostic::{Diagnostic, ErrorCode};
use glyph_eval::{RuntimeError, RuntimeErrorKind};
use glyph_ir::Span;
use glyph_parse::ParseError;

use crate::suggest::suggest_similar;

/// Every word the language knows, for "did you mean" suggestions.
const KNOWN_WORDS: &[&str] = &[
    "+", "-", "=", ">", "<", ".", "dup", "if", "else", "end", "while", "do",
];

fn span_text<'s>(source: &'s str, span: Span) -> &'s str {
    source.get(span.to_range()).unwrap_or("")
}

/// Build a diagnostic for a parse error.
pub fn parse_error_to_diagnostic(error: &ParseError, source: &str) -> Diagnostic {
    match *error {
        ParseError::UnknownWord { span } => {
            let word = span_text(source, span);
            let mut diagnostic = Diagnostic::error(ErrorCode::E1001)
                .with_message(format!("unknown word `{word}`"))
                .with_label(span, "not a Glyph word");
            if let Some(suggestion) = suggest_similar(word, KNOWN_WORDS.iter().copied()) {
                diagnostic = diagnostic.with_suggestion(format!("did you mean `{suggestion}`?"));
            }
            diagnostic
        }
        ParseError::IntOutOfRange { span } => {
            let text = span_text(source, span);
            Diagnostic::error(ErrorCode::E1002)
                .with_message(format!("integer literal `{text}` out of range"))
                .with_label(span, "does not fit a 64-bit machine word")
                .with_note(
                    "literals must be between -9223372036854775808 and 18446744073709551615",
                )
        }
        ParseError::ElseWithoutIf { span } => Diagnostic::error(ErrorCode::E2001)
            .with_message("`else` without matching `if`")
            .with_label(span, "no open `if` block here"),
        ParseError::DanglingEnd { span } => Diagnostic::error(ErrorCode::E2002)
            .with_message("`end` without an open block")
            .with_label(span, "nothing to close"),
        ParseError::UnclosedBlock { span } => Diagnostic::error(ErrorCode::E2003)
            .with_message("unclosed block")
            .with_label(span, "this block is never closed")
            .with_suggestion("add `end` to close the block"),
        ParseError::DoOutsideWhile { span } => Diagnostic::error(ErrorCode::E2004)
            .with_message("`do` outside a `while` block")
            .with_label(span, "no open `while` loop here"),
        ParseError::EndsWhileWithoutDo { span, while_span } => {
            Diagnostic::error(ErrorCode::E2005)
                .with_message("`end` closes a `while` that has no `do`")
                .with_label(span, "expected `do` before this `end`")
                .with_secondary_label(while_span, "`while` opened here")
                .with_suggestion("add `do` after the loop condition")
        }
    }
}

/// Build a diagnostic for a simulation error.
pub fn runtime_error_to_diagnostic(error: &RuntimeError) -> Diagnostic {
    match &error.kind {
        RuntimeErrorKind::StackUnderflow {
            word,
            needed,
            depth,
        } => Diagnostic::error(ErrorCode::E6001)
            .with_message(format!("stack underflow at `{word}`"))
            .with_label(
                error.span,
                format!("needs {needed} but the stack holds {depth}"),
            ),
        RuntimeErrorKind::UnresolvedJump => Diagnostic::error(ErrorCode::E9001)
            .with_message("unresolved jump target")
            .with_label(error.span, "this op was never patched by block resolution"),
        RuntimeErrorKind::Io(io_error) => Diagnostic::error(ErrorCode::E9001)
            .with_message(format!("failed to write program output: {io_error}"))
            .with_label(error.span, "while executing this op"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_lexer::lex;
    use glyph_parse::parse;

    fn first_diagnostic(source: &str) -> Diagnostic {
        let output = parse(&lex(source), source);
        let error = output.errors.first().copied();
        match error {
            Some(error) => parse_error_to_diagnostic(&error, source),
            None => panic!("expected a parse error in {source:?}"),
        }
    }

    #[test]
    fn test_unknown_word_suggests_similar() {
        let diagnostic = first_diagnostic("1 2 dupp +");
        assert_eq!(diagnostic.code, ErrorCode::E1001);
        assert!(diagnostic.message.contains("`dupp`"));
        assert_eq!(
            diagnostic.suggestions,
            vec!["did you mean `dup`?".to_string()]
        );
    }

    #[test]
    fn test_unknown_word_without_suggestion() {
        let diagnostic = first_diagnostic("frobnicate");
        assert_eq!(diagnostic.code, ErrorCode::E1001);
        assert!(diagnostic.suggestions.is_empty());
    }

    #[test]
    fn test_int_out_of_range() {
        let diagnostic = first_diagnostic("99999999999999999999");
        assert_eq!(diagnostic.code, ErrorCode::E1002);
        assert!(diagnostic.message.contains("99999999999999999999"));
    }

    #[test]
    fn test_block_error_codes() {
        assert_eq!(first_diagnostic("else").code, ErrorCode::E2001);
        assert_eq!(first_diagnostic("end").code, ErrorCode::E2002);
        assert_eq!(first_diagnostic("1 if").code, ErrorCode::E2003);
        assert_eq!(first_diagnostic("1 do end").code, ErrorCode::E2004);
        assert_eq!(first_diagnostic("while 1 end").code, ErrorCode::E2005);
    }

    #[test]
    fn test_ends_while_without_do_has_secondary_label() {
        let diagnostic = first_diagnostic("while 1 end");
        assert_eq!(diagnostic.labels.len(), 2);
    }

    #[test]
    fn test_runtime_underflow_diagnostic() {
        let output = parse(&lex("1 +"), "1 +");
        let mut sink = Vec::new();
        let error = match glyph_eval::simulate_program(&output.program, &mut sink) {
            Err(error) => error,
            Ok(()) => panic!("expected a runtime error"),
        };
        let diagnostic = runtime_error_to_diagnostic(&error);
        assert_eq!(diagnostic.code, ErrorCode::E6001);
        assert!(diagnostic.message.contains('+'));
    }
}
