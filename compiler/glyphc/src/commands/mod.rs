//! Command handlers for the Glyph CLI.
//!
//! Each submodule implements one CLI command (sim, com, check, ...).
//! Shared utilities like `read_file` and the frontend pipeline live
//! here in the module root.

use std::io::{self, IsTerminal};

use tracing::debug;

use glyph_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use glyph_ir::Program;

use crate::problem;

pub mod build;
mod check;
mod debug;
mod explain;
mod sim;

pub use build::{build_file, parse_build_options, write_asm, BuildOptions};
pub use check::check_file;
pub use debug::{lex_file, parse_file};
pub use explain::explain_error;
pub use sim::simulate_file;

/// Frontend output for a single file: the source text and the resolved
/// program.
pub(crate) struct Frontend {
    pub source: String,
    pub program: Program,
}

/// Run the frontend pipeline (lex then parse), reporting every error.
///
/// All parse errors render through the terminal emitter with snippets;
/// when any are present the process exits with code 1. This is the
/// single entry point for `sim`, `com` and `check`.
pub(crate) fn load_program(path: &str) -> Frontend {
    let source = read_file(path);
    let tokens = glyph_lexer::lex(&source);
    let output = glyph_parse::parse(&tokens, &source);
    debug!(
        tokens = tokens.len(),
        ops = output.program.len(),
        errors = output.errors.len(),
        "parsed {path}"
    );

    if output.has_errors() {
        let is_tty = io::stderr().is_terminal();
        let mut emitter = TerminalEmitter::<io::Stderr>::stderr(ColorMode::Auto, is_tty)
            .with_source(&source)
            .with_file_path(path);
        for error in &output.errors {
            emitter.emit(&problem::parse_error_to_diagnostic(error, &source));
        }
        emitter.emit_summary(output.errors.len(), 0);
        emitter.flush();
        std::process::exit(1);
    }

    Frontend {
        source,
        program: output.program,
    }
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Report a driver-level diagnostic (no source snippet) and exit.
pub(crate) fn fail(diagnostic: &glyph_diagnostic::Diagnostic) -> ! {
    let is_tty = io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::<io::Stderr>::stderr(ColorMode::Auto, is_tty);
    emitter.emit(diagnostic);
    emitter.flush();
    std::process::exit(1);
}
