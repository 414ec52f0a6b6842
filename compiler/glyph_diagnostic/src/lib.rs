//! Diagnostic system for rich error reporting.
//!
//! Every error the toolchain reports goes through this crate:
//! - Error codes for searchability (`glyph --explain E2003`)
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Context labels (why it's wrong)
//! - Suggestions (how to fix)
//!
//! Rendering happens in [`emitter`]: with source text attached the
//! terminal emitter produces rustc-style snippets with caret underlines,
//! otherwise a compact one-line-per-label fallback.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
