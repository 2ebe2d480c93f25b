//! Integration tests for Layer 3: Runtime
//!
//! Tests for the shell, its configuration, and the shop command tree.

mod config;
mod shell;
