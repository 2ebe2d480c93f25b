//! Core values, errors, messages, and invoker interfaces for Parley.
//!
//! This crate provides:
//! - [`Value`] - The value type stored in parse contexts
//! - [`Error`] / [`ArgumentError`] - Rich error types with context
//! - [`Message`] / [`MessageArgs`] - Templates with lazy placeholders
//! - [`Invoker`] / [`MessageSink`] - Who runs a command and where replies go

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod invoker;
pub mod message;
pub mod value;

pub use error::{
    ArgumentError, ArgumentErrorKind, ArgumentLabel, Error, ErrorContext, ErrorKind,
    NO_PERMISSION_MESSAGE, Result, UNEXPECTED_ERROR_MESSAGE,
};
pub use invoker::{Identity, Invoker, InvokerKind, MessageLog, MessageSink, WILDCARD_PERMISSION};
pub use message::{Message, MessageArgs};
pub use value::Value;
