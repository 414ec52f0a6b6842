//! Terminal emitter.
//!
//! Human-readable diagnostic output with optional ANSI color support.
//! When the source text is attached via [`TerminalEmitter::with_source`],
//! labels render as rustc-style snippets with line gutters and caret
//! underlines; otherwise a compact byte-offset fallback is used.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Number of decimal digits in `n`, for gutter alignment.
fn digit_count(n: u32) -> usize {
    let mut n = n;
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support and snippet rendering.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
    file_path: Option<String>,
    line_table: Option<LineOffsetTable>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
            line_table: None,
        }
    }

    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Attach source text, enabling snippet rendering for labels.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.line_table = Some(LineOffsetTable::build(source));
        self.source = Some(source.to_string());
        self
    }

    /// Attach the file path shown in `--> file:line:col` headers.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        if self.colors {
            let _ = write!(self.writer, "{color}{severity}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{severity}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    /// Render labels as byte-offset lines when no source is attached.
    fn emit_labels_fallback(&mut self, diagnostic: &Diagnostic) {
        for label in &diagnostic.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            let color = if label.is_primary {
                colors::ERROR
            } else {
                colors::SECONDARY
            };
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
        }
    }

    /// Render labels as rustc-style snippets.
    ///
    /// Layout, for a primary label on line 3 column 5 of `loop.glyph`:
    ///
    /// ```text
    ///   --> loop.glyph:3:5
    ///     |
    ///   3 | 1 2 dupp +
    ///     |     ^^^^ not a glyph word
    /// ```
    fn emit_labels_snippet(&mut self, diagnostic: &Diagnostic, source: &str) {
        let table = match &self.line_table {
            Some(t) => t.clone(),
            None => LineOffsetTable::build(source),
        };

        // Location header from the first primary label (or the first label).
        let header_label = diagnostic
            .labels
            .iter()
            .find(|l| l.is_primary)
            .or_else(|| diagnostic.labels.first());
        if let Some(label) = header_label {
            let (line, col) = table.offset_to_line_col(source, label.span.start);
            let path = self.file_path.as_deref().unwrap_or("<input>").to_string();
            let _ = writeln!(self.writer, "  --> {path}:{line}:{col}");
        }

        // Gutter width fits the largest line number we will print.
        let max_line = diagnostic
            .labels
            .iter()
            .map(|l| table.line_from_offset(l.span.start))
            .max()
            .unwrap_or(1);
        let width = digit_count(max_line);

        let _ = writeln!(self.writer, "  {:>width$} |", "");

        let mut last_line_printed: Option<u32> = None;
        for label in &diagnostic.labels {
            let line = table.line_from_offset(label.span.start);
            let line_text = line_text(source, &table, line);

            if last_line_printed != Some(line) {
                let _ = writeln!(self.writer, "  {line:>width$} | {line_text}");
                last_line_printed = Some(line);
            }

            let (caret_pad, caret_len) = caret_geometry(source, &table, label, line);
            let _ = write!(self.writer, "  {:>width$} | ", "");
            let _ = write!(self.writer, "{}", " ".repeat(caret_pad));
            let (mark, color) = if label.is_primary {
                ("^", colors::ERROR)
            } else {
                ("-", colors::SECONDARY)
            };
            let underline = mark.repeat(caret_len);
            self.write_colored(&underline, color);
            if !label.message.is_empty() {
                let _ = write!(self.writer, " ");
                self.write_colored(&label.message, color);
            }
            let _ = writeln!(self.writer);
        }
    }

    fn emit_footers(&mut self, diagnostic: &Diagnostic) {
        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}help{}", colors::HELP, colors::RESET);
            } else {
                let _ = write!(self.writer, "help");
            }
            let _ = writeln!(self.writer, ": {suggestion}");
        }
    }
}

/// The text of a 1-based line, without its trailing newline.
fn line_text(source: &str, table: &LineOffsetTable, line: u32) -> String {
    let start = table.line_start_offset(line).unwrap_or(0) as usize;
    let end = table
        .line_start_offset(line + 1)
        .map_or(source.len(), |o| o as usize);
    source[start..end.min(source.len())]
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

/// Caret padding (in character columns from line start) and caret width.
///
/// A point span still gets one caret. The width counts characters rather
/// than bytes so alignment survives multibyte source text.
fn caret_geometry(source: &str, table: &LineOffsetTable, label: &Label, line: u32) -> (usize, usize) {
    let line_start = table.line_start_offset(line).unwrap_or(0) as usize;
    let span_start = (label.span.start as usize).min(source.len());
    let span_end = (label.span.end as usize).min(source.len());

    let pad = source[line_start..span_start].chars().count();
    let len = source[span_start..span_end.max(span_start)].chars().count();
    (pad, len.max(1))
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if !diagnostic.labels.is_empty() {
            match self.source.take() {
                Some(source) => {
                    self.emit_labels_snippet(diagnostic, &source);
                    self.source = Some(source);
                }
                None => self.emit_labels_fallback(diagnostic),
            }
        }

        self.emit_footers(diagnostic);

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            self.write_colored("error", colors::ERROR);

            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };

            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {} warning{} emitted",
                    warning_count,
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {} warning{} emitted",
                warning_count,
                plural_s(warning_count)
            );
        }
    }
}
