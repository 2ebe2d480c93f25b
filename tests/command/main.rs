//! Integration tests for Layer 2: Command
//!
//! Tests for command registration, dispatch, parse-only runs, and completion.

mod completion;
mod dispatch;
mod registration;
