//! Parley - Command tree dispatch with typed arguments and fallback backtracking
//!
//! This crate re-exports all layers of the Parley system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parley_runtime   : Shell, line editing, configuration, CLI
//! Layer 2: parley_command   : Command nodes, registries, tree dispatch
//! Layer 1: parley_parser    : Token cursor, arguments, parsing engine
//! Layer 0: parley_foundation: Core types (Value, Error, Message, Invoker)
//! ```

pub use parley_command as command;
pub use parley_foundation as foundation;
pub use parley_parser as parser;
pub use parley_runtime as runtime;
