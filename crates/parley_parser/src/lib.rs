//! Argument parsing for Parley commands.
//!
//! This crate turns the tokens after a command's alias into named values,
//! with support for arguments that fall back to alternative interpretations
//! once the rest of the input is known.
//!
//! # Architecture
//!
//! ```text
//! ["Bob", "2"]
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  TOKEN CURSOR   │  → position, snapshot/restore
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  ARGUMENTS      │  → parse one value each, or raise a fallback signal
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  ARGUMENT       │  → pending fallbacks, buffered contexts, leftover input
//! │  PARSER         │
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  PARSE CONTEXT  │  → { player: "Bob", page: 2 }
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cursor`] - Token cursor with snapshots
//! - [`context`] - Parse contexts and buffered overlays
//! - [`argument`] - The [`Argument`] trait and parse outcomes
//! - [`fallback`] - Fallback signals and the [`FallbackArgument`] trait
//! - [`arguments`] - Reusable argument types and combinators
//! - [`engine`] - The fallback-aware [`ArgumentParser`]
//! - [`completion`] - Suggestions for partially typed input

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod argument;
pub mod arguments;
pub mod completion;
pub mod context;
pub mod cursor;
pub mod engine;
pub mod fallback;

pub use argument::{
    Argument, ArgumentMeta, MAX_SUGGESTIONS, ParseFailure, ParseResult, format_argument,
    suggest_prefixed,
};
pub use arguments::{
    ArgumentExt, DefinitionError, FirstOfArgument, FixedValueArgument, IntegerArgument,
    InvokerNameArgument, LiteralArgument, NameArgument, NameDirectory, NamedArgument,
    OptionalArgument, StringArgument, TypedFallback,
};
pub use completion::complete_arguments;
pub use context::{BufferedContext, ContextMap, ParseContext};
pub use cursor::{CursorSnapshot, TokenCursor};
pub use engine::ArgumentParser;
pub use fallback::{FallbackArgument, FallbackSignal};
