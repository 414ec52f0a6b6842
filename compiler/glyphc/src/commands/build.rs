//! The `com` command: compile a program to a native executable.
//!
//! Lowers the program to NASM source, assembles it with `nasm -felf64`
//! and links with `ld`. Both tool invocations are echoed as `[CMD]`
//! lines so the build steps are visible and reproducible by hand.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

use glyph_codegen::compile_program;
use glyph_diagnostic::{Diagnostic, ErrorCode};
use glyph_ir::Program;

use super::{fail, load_program};

/// Options for the `com` command.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Output executable path. Defaults to the input path with the
    /// `.glyph` extension stripped.
    pub output: Option<PathBuf>,
    /// Run the executable after building, forwarding its exit code.
    pub run: bool,
    /// Stop after writing the `.asm` file.
    pub emit_asm: bool,
}

impl BuildOptions {
    /// Merge another set of options into this one. Set fields win.
    pub fn merge(&mut self, other: &BuildOptions) {
        if other.output.is_some() {
            self.output.clone_from(&other.output);
        }
        self.run |= other.run;
        self.emit_asm |= other.emit_asm;
    }
}

/// Parse flag arguments into build options. `-o` needs lookahead and is
/// handled by the caller.
pub fn parse_build_options(args: &[String]) -> BuildOptions {
    let mut options = BuildOptions::default();
    for arg in args {
        match arg.as_str() {
            "-r" | "--run" => options.run = true,
            "-S" | "--emit=asm" => options.emit_asm = true,
            _ => eprintln!("warning: unknown option '{arg}' ignored"),
        }
    }
    options
}

/// Compile a file to a native executable.
pub fn build_file(path: &str, options: &BuildOptions) {
    let frontend = load_program(path);

    let base = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(path));
    let asm_path = base.with_extension("asm");
    debug!(output = %base.display(), "building {path}");

    println!("[INFO] Generating {}", asm_path.display());
    if let Err(error) = write_asm(&frontend.program, &asm_path) {
        fail(
            &Diagnostic::error(ErrorCode::E5003)
                .with_message(format!("failed to write '{}': {error}", asm_path.display())),
        );
    }

    if options.emit_asm {
        return;
    }

    let status = run_tool("nasm", &[OsStr::new("-felf64"), asm_path.as_os_str()]);
    if !status.success() {
        fail(&Diagnostic::error(ErrorCode::E5002)
            .with_message(format!("`nasm` exited with {status}")));
    }

    let obj_path = base.with_extension("o");
    let status = run_tool(
        "ld",
        &[OsStr::new("-o"), base.as_os_str(), obj_path.as_os_str()],
    );
    if !status.success() {
        fail(&Diagnostic::error(ErrorCode::E5002)
            .with_message(format!("`ld` exited with {status}")));
    }

    if options.run {
        run_executable(&base);
    }
}

/// Lower the program and write the assembly file.
pub fn write_asm(program: &Program, asm_path: &Path) -> io::Result<()> {
    std::fs::write(asm_path, compile_program(program))
}

/// Default output path: strip a `.glyph` extension, otherwise use `.out`.
fn default_output_path(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("glyph"))
    {
        path.with_extension("")
    } else {
        path.with_extension("out")
    }
}

/// Run an external tool, echoing the command line first.
fn run_tool(program: &str, args: &[&OsStr]) -> ExitStatus {
    let rendered: Vec<String> = args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    println!("[CMD] {program} {}", rendered.join(" "));

    match Command::new(program).args(args).status() {
        Ok(status) => {
            debug!(%status, "{program} finished");
            status
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            fail(&Diagnostic::error(ErrorCode::E5001)
                .with_message(format!("`{program}` not found in PATH"))
                .with_suggestion(format!("install `{program}` and try again")));
        }
        Err(error) => {
            fail(&Diagnostic::error(ErrorCode::E5002)
                .with_message(format!("failed to run `{program}`: {error}")));
        }
    }
}

/// Run the built executable, forwarding its exit code.
fn run_executable(base: &Path) -> ! {
    // A bare file name must be ./-qualified or the shell lookup fails
    let exe = if base.components().count() > 1 {
        base.to_path_buf()
    } else {
        Path::new(".").join(base)
    };
    println!("[CMD] {}", exe.display());

    match Command::new(&exe).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(error) => {
            fail(&Diagnostic::error(ErrorCode::E5002)
                .with_message(format!("failed to run '{}': {error}", exe.display())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_output_path_strips_glyph_extension() {
        assert_eq!(default_output_path("loop.glyph"), PathBuf::from("loop"));
        assert_eq!(
            default_output_path("dir/prog.glyph"),
            PathBuf::from("dir/prog")
        );
    }

    #[test]
    fn test_default_output_path_other_extension() {
        assert_eq!(default_output_path("prog.txt"), PathBuf::from("prog.out"));
        assert_eq!(default_output_path("prog"), PathBuf::from("prog.out"));
    }

    #[test]
    fn test_parse_build_options() {
        let args = vec!["-r".to_string(), "--emit=asm".to_string()];
        let options = parse_build_options(&args);
        assert!(options.run);
        assert!(options.emit_asm);
        assert!(options.output.is_none());
    }

    #[test]
    fn test_merge_keeps_set_fields() {
        let mut options = BuildOptions {
            output: Some(PathBuf::from("a.out")),
            ..BuildOptions::default()
        };
        options.merge(&BuildOptions {
            run: true,
            ..BuildOptions::default()
        });
        assert_eq!(options.output, Some(PathBuf::from("a.out")));
        assert!(options.run);
        assert!(!options.emit_asm);
    }
}
