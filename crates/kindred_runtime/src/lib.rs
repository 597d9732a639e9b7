//! Interactive shell, command files, and CLI for Kindred.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over a shared family
//! - [`Command`] - The shell's command language
//! - [`RuntimeConfig`] / [`ReplConfig`] - CLI and shell configuration
//! - Plain-text and JSON rendering of members and trees

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod editor;
pub mod logging;
pub mod render;
pub mod repl;

pub use command::{Command, JsonView, tokenize};
pub use config::{DEFAULT_LOG_FILTER, LOG_ENV, ReplConfig, RuntimeConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, Reply};
