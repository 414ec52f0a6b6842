//! Error codes for all toolchain diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2003`) with the first digit
//! indicating the phase. Used for `--explain` lookups and documentation.

use std::fmt;

/// Error codes for all toolchain diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Word-level parse errors
/// - E2xxx: Block resolution errors
/// - E5xxx: Build / assembly errors
/// - E6xxx: Runtime (simulation) errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parse Errors (E1xxx)
    /// Unknown word
    E1001,
    /// Integer literal out of range
    E1002,

    // Block Resolution Errors (E2xxx)
    /// `else` without matching `if`
    E2001,
    /// `end` without an open block
    E2002,
    /// Unclosed block at end of input
    E2003,
    /// `do` outside a `while` block
    E2004,
    /// `end` closing a `while` that has no `do`
    E2005,

    // Build Errors (E5xxx)
    /// External tool not found
    E5001,
    /// External tool exited with failure
    E5002,
    /// Failed to write output file
    E5003,

    // Runtime Errors (E6xxx)
    /// Stack underflow
    E6001,

    // Internal Errors (E9xxx)
    /// Internal error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing and `FromStr`.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    pub const ALL: &[ErrorCode] = &[
        // Parse
        ErrorCode::E1001,
        ErrorCode::E1002,
        // Blocks
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        // Build
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E5003,
        // Runtime
        ErrorCode::E6001,
        // Internal
        ErrorCode::E9001,
    ];

    /// Get the numeric code as a string (e.g., "E2003").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parse
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            // Blocks
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            // Build
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            // Runtime
            ErrorCode::E6001 => "E6001",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2003"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`],
/// so it is automatically exhaustive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
