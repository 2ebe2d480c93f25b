//! Integration tests for Layer 1: Parser
//!
//! Tests for the token cursor, parse contexts, the argument library, and the
//! parsing and completion engines.

mod completion;
mod contexts;
mod cursor;
mod engine;
