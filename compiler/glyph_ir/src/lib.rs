//! Glyph IR - shared data types for the Glyph toolchain.
//!
//! This crate contains the core data structures every phase consumes:
//! - [`Span`] - byte-offset source locations
//! - [`Token`] and [`TokenList`] - lexer output
//! - [`Op`] and [`Program`] - the flat operation list executed by the
//!   simulator and lowered by the assembly backend
//!
//! # Design Philosophy
//!
//! Glyph programs are flat word sequences, so the IR stays flat too:
//! no trees, no indirection. Jumps are indices into the op vector,
//! resolved in place by the parser's block-resolution pass.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod op;
mod span;
mod token;

pub use op::{Op, OpKind, Program, UNRESOLVED_TARGET};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
