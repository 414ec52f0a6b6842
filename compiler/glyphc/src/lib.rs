//! Glyph toolchain driver.
//!
//! Library surface behind the `glyph` binary: command handlers, the
//! conversion of phase errors into diagnostics, and "did you mean"
//! suggestions for misspelled words.

use std::sync::Once;

pub mod commands;
pub mod problem;
pub mod suggest;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from the `RUST_LOG` environment variable.
///
/// Quiet by default: when `RUST_LOG` is unset no subscriber is
/// installed at all, so normal runs pay nothing for instrumentation.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let filter = tracing_subscriber::EnvFilter::from_default_env();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
