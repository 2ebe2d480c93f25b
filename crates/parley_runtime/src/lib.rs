//! Interactive shell, configuration, and CLI for Parley.
//!
//! This crate provides:
//! - [`Shell`] - Read loop dispatching each line to a root command
//! - [`RustylineEditor`] - Line editing with command completion
//! - [`ShellConfig`] - TOML configuration for the shell and binary
//! - [`shop_commands`] - The `/shop` command tree served by the binary
//!
//! ```text
//!   line ──▶ tokenize ──▶ root alias? ──▶ CommandTree::dispatch ──▶ sink
//!                             │
//!                             └─ exit / quit ──▶ end of session
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod config;
pub mod editor;
pub mod logging;
pub mod shell;
pub mod tokenize;

pub use commands::{Listing, PAGE_SIZE, ShopState, shop_commands};
pub use config::{ConfigError, ShellConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use logging::init_logging;
pub use shell::{ConsoleSink, EXIT_COMMANDS, Flow, Shell, complete_line};
pub use tokenize::{split_command, tokenize, tokenize_partial};
