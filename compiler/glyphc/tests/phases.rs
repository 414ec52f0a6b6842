// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Phase-based toolchain tests.
//!
//! Organizes integration tests by pipeline phase rather than by language
//! feature:
//!
//! - `parse/` - lexer and parser behavior over whole files
//! - `eval/` - simulator runs on embedded programs
//! - `codegen/` - assembly writing through the driver
//! - `common/` - shared test utilities
//!
//! Run with `cargo test -p glyphc --test phases`.

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/eval/mod.rs"]
mod eval;

#[path = "phases/codegen/mod.rs"]
mod codegen;
