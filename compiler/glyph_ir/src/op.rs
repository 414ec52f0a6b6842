//! Operations and programs.
//!
//! A Glyph program is a flat vector of ops. Control flow is expressed as
//! indices into that vector: `if`/`else`/`end`/`do` carry a jump target
//! that the parser's block-resolution pass patches in.

use super::Span;
use std::fmt;

/// Sentinel for a jump target that block resolution has not patched yet.
///
/// A fully resolved [`Program`] contains no op with this target; the
/// simulator treats one as an internal error rather than jumping.
pub const UNRESOLVED_TARGET: usize = usize::MAX;

/// An operation with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Op {
    pub kind: OpKind,
    pub span: Span,
}

impl Op {
    #[inline]
    pub fn new(kind: OpKind, span: Span) -> Self {
        Op { kind, span }
    }
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Operation kinds for Glyph.
///
/// Stack effects, with the top of the stack written rightmost:
///
/// | Op            | Effect                                      |
/// |---------------|---------------------------------------------|
/// | `Push(n)`     | `( -- n )`                                  |
/// | `Plus`        | `( a b -- a+b )` wrapping                   |
/// | `Minus`       | `( a b -- a-b )` wrapping                   |
/// | `Equal`       | `( a b -- a==b )` 1 or 0                    |
/// | `Greater`     | `( a b -- a>b )` signed, 1 or 0             |
/// | `Less`        | `( a b -- a<b )` signed, 1 or 0             |
/// | `Dup`         | `( a -- a a )`                              |
/// | `Dump`        | `( a -- )` prints unsigned decimal          |
/// | `If`          | `( a -- )` jumps to `target` when a is 0    |
/// | `Else`        | `( -- )` unconditional jump to `target`     |
/// | `End`         | `( -- )` jump to `target` (loop back edge)  |
/// | `While`       | `( -- )` label only                         |
/// | `Do`          | `( a -- )` jumps to `target` when a is 0    |
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum OpKind {
    Push(u64),
    Plus,
    Minus,
    Equal,
    Greater,
    Less,
    Dup,
    Dump,
    If { target: usize },
    Else { target: usize },
    End { target: usize },
    While,
    Do { target: usize },
}

impl OpKind {
    /// Short lowercase name, used in generated assembly comments.
    pub const fn name(&self) -> &'static str {
        match self {
            OpKind::Push(_) => "push",
            OpKind::Plus => "plus",
            OpKind::Minus => "minus",
            OpKind::Equal => "equal",
            OpKind::Greater => "greater",
            OpKind::Less => "less",
            OpKind::Dup => "dup",
            OpKind::Dump => "dump",
            OpKind::If { .. } => "if",
            OpKind::Else { .. } => "else",
            OpKind::End { .. } => "end",
            OpKind::While => "while",
            OpKind::Do { .. } => "do",
        }
    }

    /// The word as it appears in source, for diagnostics.
    pub const fn display_name(&self) -> &'static str {
        match self {
            OpKind::Push(_) => "push",
            OpKind::Plus => "+",
            OpKind::Minus => "-",
            OpKind::Equal => "=",
            OpKind::Greater => ">",
            OpKind::Less => "<",
            OpKind::Dup => "dup",
            OpKind::Dump => ".",
            OpKind::If { .. } => "if",
            OpKind::Else { .. } => "else",
            OpKind::End { .. } => "end",
            OpKind::While => "while",
            OpKind::Do { .. } => "do",
        }
    }

    /// Jump target for ops that carry one.
    #[inline]
    pub const fn jump_target(&self) -> Option<usize> {
        match self {
            OpKind::If { target }
            | OpKind::Else { target }
            | OpKind::End { target }
            | OpKind::Do { target } => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Debug for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Push(n) => write!(f, "Push({n})"),
            OpKind::If { target } => fmt_jump(f, "If", *target),
            OpKind::Else { target } => fmt_jump(f, "Else", *target),
            OpKind::End { target } => fmt_jump(f, "End", *target),
            OpKind::Do { target } => fmt_jump(f, "Do", *target),
            OpKind::Plus => write!(f, "Plus"),
            OpKind::Minus => write!(f, "Minus"),
            OpKind::Equal => write!(f, "Equal"),
            OpKind::Greater => write!(f, "Greater"),
            OpKind::Less => write!(f, "Less"),
            OpKind::Dup => write!(f, "Dup"),
            OpKind::Dump => write!(f, "Dump"),
            OpKind::While => write!(f, "While"),
        }
    }
}

fn fmt_jump(f: &mut fmt::Formatter<'_>, name: &str, target: usize) -> fmt::Result {
    if target == UNRESOLVED_TARGET {
        write!(f, "{name}(-> ?)")
    } else {
        write!(f, "{name}(-> {target})")
    }
}

/// A parsed program: the flat op list in execution order.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    #[inline]
    pub fn new(ops: Vec<Op>) -> Self {
        Program { ops }
    }

    /// Number of ops.
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Get op at index.
    #[inline]
    pub fn get(&self, ip: usize) -> Option<&Op> {
        self.ops.get(ip)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Op;
    crate::static_assert_size!(Op, 24);
}
