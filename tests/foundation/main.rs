//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Error, Message, and invokers.

mod errors;
mod invokers;
mod messages;
mod values;
