//! Integration tests for Layer 3: Runtime
//!
//! Tests for the command language, configuration, and the shell driven by
//! a scripted line editor.

mod commands;
mod repl;
