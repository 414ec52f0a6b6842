//! Parser for Glyph: token-to-op mapping plus block resolution.
//!
//! Parsing is two passes over the token list:
//!
//! 1. Every token maps 1:1 to an [`Op`]; unknown words produce an error
//!    and no op.
//! 2. Block resolution walks the op vector with a stack of open blocks,
//!    back-patching the jump targets of `if`/`else`/`end`/`do`.
//!
//! All errors are accumulated in [`ParseOutput::errors`]; parsing never
//! aborts early, so a single run reports every problem in the file.

use std::fmt;

use smallvec::SmallVec;

use glyph_ir::{Op, OpKind, Program, Span, TokenKind, TokenList, UNRESOLVED_TARGET};

/// A parse error with the span it was detected at.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ParseError {
    /// A word that is not part of the language.
    UnknownWord { span: Span },
    /// A numeric-looking word whose value does not fit a machine word.
    IntOutOfRange { span: Span },
    /// `else` with no open `if` block.
    ElseWithoutIf { span: Span },
    /// `end` with no open block at all.
    DanglingEnd { span: Span },
    /// `end` closing a `while` that never had a `do`.
    EndsWhileWithoutDo { span: Span, while_span: Span },
    /// `do` with no open `while` block.
    DoOutsideWhile { span: Span },
    /// A block opener that is never closed; reported at the opener.
    UnclosedBlock { span: Span },
}

impl ParseError {
    /// The span the error is reported at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnknownWord { span }
            | ParseError::IntOutOfRange { span }
            | ParseError::ElseWithoutIf { span }
            | ParseError::DanglingEnd { span }
            | ParseError::EndsWhileWithoutDo { span, .. }
            | ParseError::DoOutsideWhile { span }
            | ParseError::UnclosedBlock { span } => *span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownWord { .. } => write!(f, "unknown word"),
            ParseError::IntOutOfRange { .. } => write!(f, "integer literal out of range"),
            ParseError::ElseWithoutIf { .. } => write!(f, "`else` without matching `if`"),
            ParseError::DanglingEnd { .. } => write!(f, "`end` without an open block"),
            ParseError::EndsWhileWithoutDo { .. } => {
                write!(f, "`end` closes a `while` that has no `do`")
            }
            ParseError::DoOutsideWhile { .. } => write!(f, "`do` outside a `while` block"),
            ParseError::UnclosedBlock { .. } => write!(f, "unclosed block"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parser output: the program plus every error found.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// An open block on the resolution stack.
///
/// `Do` carries the index of its `while` so `end` can emit the loop
/// back edge without re-walking the op vector.
enum Opener {
    If(usize),
    Else(usize),
    While(usize),
    Do { ip: usize, while_ip: usize },
}

impl Opener {
    fn ip(&self) -> usize {
        match self {
            Opener::If(ip) | Opener::Else(ip) | Opener::While(ip) | Opener::Do { ip, .. } => *ip,
        }
    }
}

/// Parse a token list into a resolved program.
///
/// `source` is the text the tokens were lexed from; it is consulted only
/// to classify unknown words (a numeric-looking word reports as an
/// out-of-range literal instead of an unknown word).
pub fn parse(tokens: &TokenList, source: &str) -> ParseOutput {
    let mut ops = Vec::with_capacity(tokens.len());
    let mut errors = Vec::new();

    // Pass 1: word-to-op mapping.
    for token in tokens.iter() {
        let kind = match token.kind {
            TokenKind::Int(value) => OpKind::Push(value),
            TokenKind::Plus => OpKind::Plus,
            TokenKind::Minus => OpKind::Minus,
            TokenKind::Equal => OpKind::Equal,
            TokenKind::Greater => OpKind::Greater,
            TokenKind::Less => OpKind::Less,
            TokenKind::Dump => OpKind::Dump,
            TokenKind::Dup => OpKind::Dup,
            TokenKind::If => OpKind::If {
                target: UNRESOLVED_TARGET,
            },
            TokenKind::Else => OpKind::Else {
                target: UNRESOLVED_TARGET,
            },
            TokenKind::End => OpKind::End {
                target: UNRESOLVED_TARGET,
            },
            TokenKind::While => OpKind::While,
            TokenKind::Do => OpKind::Do {
                target: UNRESOLVED_TARGET,
            },
            TokenKind::Word => {
                errors.push(classify_word(token.span, source));
                continue;
            }
            TokenKind::Eof => break,
        };
        ops.push(Op::new(kind, token.span));
    }

    // Pass 2: block resolution.
    resolve_blocks(&mut ops, &mut errors);

    ParseOutput {
        program: Program::new(ops),
        errors,
    }
}

/// Classify a `Word` token: numeric-looking text is an out-of-range
/// literal (the lexer already rejected it), everything else is unknown.
fn classify_word(span: Span, source: &str) -> ParseError {
    let text = source.get(span.to_range()).unwrap_or("");
    let digits = text.strip_prefix('-').unwrap_or(text);
    let looks_numeric = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    if looks_numeric {
        ParseError::IntOutOfRange { span }
    } else {
        ParseError::UnknownWord { span }
    }
}

/// Back-patch jump targets over the op vector.
fn resolve_blocks(ops: &mut [Op], errors: &mut Vec<ParseError>) {
    let mut open: SmallVec<[Opener; 8]> = SmallVec::new();

    for ip in 0..ops.len() {
        match ops[ip].kind {
            OpKind::If { .. } => open.push(Opener::If(ip)),
            OpKind::While => open.push(Opener::While(ip)),

            OpKind::Else { .. } => match open.pop() {
                Some(Opener::If(if_ip)) => {
                    // `if` falls into `else + 1` when the condition is zero
                    ops[if_ip].kind = OpKind::If { target: ip + 1 };
                    open.push(Opener::Else(ip));
                }
                Some(other) => {
                    errors.push(ParseError::ElseWithoutIf { span: ops[ip].span });
                    open.push(other);
                }
                None => errors.push(ParseError::ElseWithoutIf { span: ops[ip].span }),
            },

            OpKind::Do { .. } => match open.pop() {
                Some(Opener::While(while_ip)) => open.push(Opener::Do { ip, while_ip }),
                Some(other) => {
                    errors.push(ParseError::DoOutsideWhile { span: ops[ip].span });
                    open.push(other);
                }
                None => errors.push(ParseError::DoOutsideWhile { span: ops[ip].span }),
            },

            OpKind::End { .. } => match open.pop() {
                Some(Opener::If(if_ip)) => {
                    ops[if_ip].kind = OpKind::If { target: ip };
                    ops[ip].kind = OpKind::End { target: ip + 1 };
                }
                Some(Opener::Else(else_ip)) => {
                    ops[else_ip].kind = OpKind::Else { target: ip };
                    ops[ip].kind = OpKind::End { target: ip + 1 };
                }
                Some(Opener::Do { ip: do_ip, while_ip }) => {
                    // Loop back edge: end jumps to the while, do skips past end
                    ops[ip].kind = OpKind::End { target: while_ip };
                    ops[do_ip].kind = OpKind::Do { target: ip + 1 };
                }
                Some(Opener::While(while_ip)) => {
                    errors.push(ParseError::EndsWhileWithoutDo {
                        span: ops[ip].span,
                        while_span: ops[while_ip].span,
                    });
                    ops[ip].kind = OpKind::End { target: ip + 1 };
                }
                None => {
                    errors.push(ParseError::DanglingEnd { span: ops[ip].span });
                    ops[ip].kind = OpKind::End { target: ip + 1 };
                }
            },

            _ => {}
        }
    }

    // Everything still open is unclosed, reported in source order.
    for opener in &open {
        errors.push(ParseError::UnclosedBlock {
            span: ops[opener.ip()].span,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_lexer::lex;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> ParseOutput {
        parse(&lex(source), source)
    }

    fn op_kinds(output: &ParseOutput) -> Vec<OpKind> {
        output.program.ops.iter().map(|op| op.kind).collect()
    }

    #[test]
    fn test_simple_program() {
        let output = parse_source("34 35 + .");
        assert!(!output.has_errors());
        assert_eq!(
            op_kinds(&output),
            vec![
                OpKind::Push(34),
                OpKind::Push(35),
                OpKind::Plus,
                OpKind::Dump,
            ]
        );
    }

    #[test]
    fn test_if_end_resolution() {
        // ops: 0 Push 1 If 2 Push 3 Dump 4 End 5 Push 6 Dump
        let output = parse_source("1 if 2 . end 3 .");
        assert!(!output.has_errors());
        let kinds = op_kinds(&output);
        assert_eq!(kinds[1], OpKind::If { target: 4 });
        assert_eq!(kinds[4], OpKind::End { target: 5 });
    }

    #[test]
    fn test_if_else_end_resolution() {
        // ops: 0 Push 1 If 2 Push 3 Dump 4 Else 5 Push 6 Dump 7 End
        let output = parse_source("1 if 2 . else 3 . end");
        assert!(!output.has_errors());
        let kinds = op_kinds(&output);
        assert_eq!(kinds[1], OpKind::If { target: 5 });
        assert_eq!(kinds[4], OpKind::Else { target: 7 });
        assert_eq!(kinds[7], OpKind::End { target: 8 });
    }

    #[test]
    fn test_while_do_end_resolution() {
        // ops: 0 While 1 Push 2 Do 3 Push 4 Dump 5 End
        let output = parse_source("while 1 do 2 . end");
        assert!(!output.has_errors());
        let kinds = op_kinds(&output);
        assert_eq!(kinds[0], OpKind::While);
        assert_eq!(kinds[2], OpKind::Do { target: 6 });
        assert_eq!(kinds[5], OpKind::End { target: 0 });
    }

    #[test]
    fn test_nested_blocks() {
        // ops: 0 While 1 Dup 2 Do 3 Dup 4 If 5 Dump 6 End 7 End
        let output = parse_source("while dup do dup if . end end");
        assert!(!output.has_errors());
        let kinds = op_kinds(&output);
        assert_eq!(kinds[2], OpKind::Do { target: 8 });
        assert_eq!(kinds[4], OpKind::If { target: 6 });
        assert_eq!(kinds[6], OpKind::End { target: 7 });
        assert_eq!(kinds[7], OpKind::End { target: 0 });
    }

    #[test]
    fn test_resolved_program_has_no_sentinel() {
        let output = parse_source("1 if 2 . else 3 . end while 1 do . end");
        assert!(!output.has_errors());
        for op in &output.program.ops {
            assert_ne!(op.kind.jump_target(), Some(UNRESOLVED_TARGET), "{op:?}");
        }
    }

    #[test]
    fn test_unknown_word() {
        let output = parse_source("1 2 dupp +");
        assert_eq!(
            output.errors,
            vec![ParseError::UnknownWord {
                span: Span::new(4, 8)
            }]
        );
        // The bad word produces no op
        assert_eq!(
            op_kinds(&output),
            vec![OpKind::Push(1), OpKind::Push(2), OpKind::Plus]
        );
    }

    #[test]
    fn test_int_out_of_range() {
        let output = parse_source("99999999999999999999 .");
        assert_eq!(
            output.errors,
            vec![ParseError::IntOutOfRange {
                span: Span::new(0, 20)
            }]
        );
    }

    #[test]
    fn test_else_without_if() {
        let output = parse_source("1 2 + else 3 end");
        assert!(output
            .errors
            .iter()
            .any(|e| matches!(e, ParseError::ElseWithoutIf { .. })));
    }

    #[test]
    fn test_dangling_end() {
        let output = parse_source("1 2 + end");
        assert_eq!(
            output.errors,
            vec![ParseError::DanglingEnd {
                span: Span::new(6, 9)
            }]
        );
    }

    #[test]
    fn test_do_outside_while() {
        let output = parse_source("1 do 2 . end");
        assert!(output
            .errors
            .iter()
            .any(|e| matches!(e, ParseError::DoOutsideWhile { .. })));
    }

    #[test]
    fn test_end_closes_bare_while() {
        // ops: 0 While 1 Push 2 End
        let output = parse_source("while 1 end");
        assert_eq!(
            output.errors,
            vec![ParseError::EndsWhileWithoutDo {
                span: Span::new(8, 11),
                while_span: Span::new(0, 5)
            }]
        );
    }

    #[test]
    fn test_unclosed_block_reported_at_opener() {
        let output = parse_source("1 if 2 .");
        assert_eq!(
            output.errors,
            vec![ParseError::UnclosedBlock {
                span: Span::new(2, 4)
            }]
        );
    }

    #[test]
    fn test_errors_accumulate() {
        // An unknown word, a dangling end, and an unclosed if: all reported.
        let output = parse_source("frobnicate end 1 if 2");
        assert_eq!(output.errors.len(), 3);
        assert!(matches!(output.errors[0], ParseError::UnknownWord { .. }));
        assert!(matches!(output.errors[1], ParseError::DanglingEnd { .. }));
        assert!(matches!(output.errors[2], ParseError::UnclosedBlock { .. }));
    }

    #[test]
    fn test_empty_program() {
        let output = parse_source("");
        assert!(!output.has_errors());
        assert!(output.program.is_empty());
    }
}
