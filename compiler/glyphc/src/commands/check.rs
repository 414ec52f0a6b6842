//! The `check` command: parse and resolve blocks without executing.

use super::load_program;

/// Check a file. Errors were already reported by the frontend; getting
/// here means the file is well-formed.
pub fn check_file(path: &str) {
    let frontend = load_program(path);
    println!("OK: {path} ({} ops)", frontend.program.len());
}
