//! The `sim` command: interpret a program directly.

use std::io::{self, IsTerminal, Write};

use glyph_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use glyph_eval::simulate_program;

use super::load_program;
use crate::problem;

/// Simulate a file, writing `.` output to stdout.
pub fn simulate_file(path: &str) {
    let frontend = load_program(path);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(error) = simulate_program(&frontend.program, &mut out) {
        let _ = out.flush();
        let is_tty = io::stderr().is_terminal();
        let mut emitter = TerminalEmitter::<io::Stderr>::stderr(ColorMode::Auto, is_tty)
            .with_source(&frontend.source)
            .with_file_path(path);
        emitter.emit(&problem::runtime_error_to_diagnostic(&error));
        emitter.flush();
        std::process::exit(1);
    }
}
