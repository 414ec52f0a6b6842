//! Stack-machine simulator for Glyph programs.
//!
//! [`simulate_program`] interprets a resolved [`Program`] directly,
//! producing the same output as a compiled executable: values are 64-bit
//! machine words, `+`/`-` wrap, `>`/`<` compare signed, and `.` prints
//! unsigned decimal.

use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use glyph_ir::{Op, OpKind, Program, Span, UNRESOLVED_TARGET};

/// A runtime error with the span of the op that raised it.
#[derive(Debug)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

#[derive(Debug)]
pub enum RuntimeErrorKind {
    /// An op needed more values than the stack holds.
    StackUnderflow {
        word: &'static str,
        needed: usize,
        depth: usize,
    },
    /// A jump op still carries the unresolved sentinel. The parser
    /// patches every target on success, so this is an internal error.
    UnresolvedJump,
    /// Writing program output failed.
    Io(io::Error),
}

impl RuntimeError {
    fn underflow(op: &Op, needed: usize, depth: usize) -> Self {
        RuntimeError {
            kind: RuntimeErrorKind::StackUnderflow {
                word: op.kind.display_name(),
                needed,
                depth,
            },
            span: op.span,
        }
    }

    fn io(error: io::Error, span: Span) -> Self {
        RuntimeError {
            kind: RuntimeErrorKind::Io(error),
            span,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuntimeErrorKind::StackUnderflow {
                word,
                needed,
                depth,
            } => {
                let plural = if *needed == 1 { "value" } else { "values" };
                write!(
                    f,
                    "stack underflow: `{word}` needs {needed} {plural} but the stack has {depth}"
                )
            }
            RuntimeErrorKind::UnresolvedJump => write!(f, "unresolved jump target"),
            RuntimeErrorKind::Io(error) => write!(f, "failed to write output: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Interpret a resolved program, writing `.` output to `out`.
///
/// Execution starts at op 0 and stops when the instruction pointer
/// moves past the end of the program.
pub fn simulate_program<W: Write>(program: &Program, out: &mut W) -> Result<(), RuntimeError> {
    debug!(ops = program.len(), "simulating program");

    let mut stack: Vec<u64> = Vec::new();
    let mut ip = 0usize;

    while let Some(op) = program.get(ip) {
        match op.kind {
            OpKind::Push(value) => {
                stack.push(value);
                ip += 1;
            }
            OpKind::Plus => {
                let (a, b) = pop2(&mut stack, op)?;
                stack.push(a.wrapping_add(b));
                ip += 1;
            }
            OpKind::Minus => {
                let (a, b) = pop2(&mut stack, op)?;
                stack.push(a.wrapping_sub(b));
                ip += 1;
            }
            OpKind::Equal => {
                let (a, b) = pop2(&mut stack, op)?;
                stack.push(u64::from(a == b));
                ip += 1;
            }
            OpKind::Greater => {
                let (a, b) = pop2(&mut stack, op)?;
                stack.push(u64::from((a as i64) > (b as i64)));
                ip += 1;
            }
            OpKind::Less => {
                let (a, b) = pop2(&mut stack, op)?;
                stack.push(u64::from((a as i64) < (b as i64)));
                ip += 1;
            }
            OpKind::Dup => {
                let a = pop1(&mut stack, op)?;
                stack.push(a);
                stack.push(a);
                ip += 1;
            }
            OpKind::Dump => {
                let a = pop1(&mut stack, op)?;
                writeln!(out, "{a}").map_err(|error| RuntimeError::io(error, op.span))?;
                ip += 1;
            }
            OpKind::If { target } | OpKind::Do { target } => {
                let a = pop1(&mut stack, op)?;
                if a == 0 {
                    ip = jump(target, op)?;
                } else {
                    ip += 1;
                }
            }
            OpKind::Else { target } | OpKind::End { target } => {
                ip = jump(target, op)?;
            }
            OpKind::While => ip += 1,
        }
    }

    Ok(())
}

fn pop1(stack: &mut Vec<u64>, op: &Op) -> Result<u64, RuntimeError> {
    match stack.pop() {
        Some(value) => Ok(value),
        None => Err(RuntimeError::underflow(op, 1, 0)),
    }
}

/// Pop the two topmost values; `b` was on top.
fn pop2(stack: &mut Vec<u64>, op: &Op) -> Result<(u64, u64), RuntimeError> {
    let depth = stack.len();
    match (stack.pop(), stack.pop()) {
        (Some(b), Some(a)) => Ok((a, b)),
        _ => Err(RuntimeError::underflow(op, 2, depth)),
    }
}

fn jump(target: usize, op: &Op) -> Result<usize, RuntimeError> {
    if target == UNRESOLVED_TARGET {
        Err(RuntimeError {
            kind: RuntimeErrorKind::UnresolvedJump,
            span: op.span,
        })
    } else {
        Ok(target)
    }
}
