//! Integration tests for argument completion

use std::sync::Arc;

use parley_foundation::Identity;
use parley_parser::{
    Argument, ArgumentExt, ContextMap, FirstOfArgument, IntegerArgument, LiteralArgument,
    NameArgument, NameDirectory, TokenCursor, complete_arguments,
};

fn online() -> Arc<dyn NameDirectory> {
    Arc::new(vec!["Alice", "Bob", "Bart"])
}

fn complete(arguments: &[Box<dyn Argument>], tokens: &[&str]) -> Vec<String> {
    let mut ctx = ContextMap::new();
    let mut cursor = TokenCursor::new(tokens.iter().copied());
    complete_arguments(arguments, &Identity::player("Alice"), &mut ctx, &mut cursor)
}

#[test]
fn completes_names_case_insensitively() {
    let arguments = vec![NameArgument::new("player", online()).boxed()];
    assert_eq!(complete(&arguments, &["b"]), vec!["Bob", "Bart"]);
}

#[test]
fn empty_last_token_lists_everything() {
    let arguments = vec![NameArgument::new("player", online()).boxed()];
    assert_eq!(complete(&arguments, &[""]), vec!["Alice", "Bob", "Bart"]);
}

#[test]
fn minimum_input_length() {
    let arguments = vec![
        NameArgument::new("player", online())
            .with_min_completion_input(2)
            .boxed(),
    ];
    assert!(complete(&arguments, &["B"]).is_empty());
    assert_eq!(complete(&arguments, &["Ba"]), vec!["Bart"]);
}

#[test]
fn completes_second_argument_after_defaulted_first() {
    let arguments = vec![
        IntegerArgument::positive("amount").boxed(),
        FirstOfArgument::new(
            "scope",
            vec![
                LiteralArgument::new("all").boxed(),
                LiteralArgument::new("admin").boxed(),
            ],
        )
        .unwrap()
        .boxed(),
    ];
    assert_eq!(complete(&arguments, &["5", "ad"]), vec!["admin"]);
}
