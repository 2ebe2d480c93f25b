//! Integration tests for ArgumentParser

use std::sync::Arc;

use parley_foundation::{ArgumentError, ArgumentErrorKind, Error, ErrorKind, Identity, Value};
use parley_parser::{
    Argument, ArgumentExt, ArgumentParser, ContextMap, FirstOfArgument, IntegerArgument,
    LiteralArgument, NameArgument, NameDirectory, ParseContext, StringArgument, TokenCursor,
};

fn online() -> Arc<dyn NameDirectory> {
    Arc::new(vec!["Alice", "Bob"])
}

fn parse(arguments: &[Box<dyn Argument>], invoker: &Identity, tokens: &[&str]) -> Result<ContextMap, Error> {
    let mut cursor = TokenCursor::new(tokens.iter().copied());
    ArgumentParser::new(arguments).parse_to_map(invoker, &mut cursor)
}

fn argument_error(result: Result<ContextMap, Error>) -> ArgumentError {
    match result {
        Err(Error {
            kind: ErrorKind::Argument(err),
            ..
        }) => err,
        other => panic!("expected argument error, got {other:?}"),
    }
}

fn list_arguments() -> Vec<Box<dyn Argument>> {
    vec![
        NameArgument::new("player", online())
            .or_any_string()
            .or_invoker_name()
            .boxed(),
        IntegerArgument::positive("page").or_default_value(1).boxed(),
    ]
}

// =============================================================================
// Fallback Backtracking
// =============================================================================

#[test]
fn known_player_and_page() {
    let ctx = parse(&list_arguments(), &Identity::console(), &["alice", "3"]).unwrap();
    assert_eq!(ctx.get_str("player"), Some("Alice"));
    assert_eq!(ctx.get_int("page"), Some(3));
}

#[test]
fn page_only_falls_back_to_invoker() {
    let ctx = parse(&list_arguments(), &Identity::player("Bob"), &["2"]).unwrap();
    assert_eq!(ctx.get_str("player"), Some("Bob"));
    assert_eq!(ctx.get_int("page"), Some(2));
}

#[test]
fn unknown_player_kept_as_text() {
    let ctx = parse(&list_arguments(), &Identity::console(), &["123", "2"]).unwrap();
    assert_eq!(ctx.get_str("player"), Some("123"));
    assert_eq!(ctx.get_int("page"), Some(2));
}

#[test]
fn console_cannot_omit_player() {
    let arguments = vec![
        NameArgument::new("player", online()).or_invoker_name().boxed(),
        IntegerArgument::positive("page").or_default_value(1).boxed(),
    ];
    let err = argument_error(parse(&arguments, &Identity::console(), &["123", "2"]));
    assert_eq!(err.input(), Some("123"));
    assert_eq!(err.root_argument().map(|l| &*l.name), Some("player"));
}

// =============================================================================
// Argument Library Through The Engine
// =============================================================================

#[test]
fn out_of_bounds_is_rejected() {
    let arguments = vec![
        NameArgument::new("player", online()).boxed(),
        IntegerArgument::positive("amount").boxed(),
    ];
    let err = argument_error(parse(&arguments, &Identity::console(), &["bob", "0"]));
    assert!(err.is_rejected());
    assert_eq!(err.to_string(), "Not allowed for amount: 0");
}

#[test]
fn greedy_string_takes_the_rest() {
    let arguments = vec![
        IntegerArgument::new("amount").boxed(),
        StringArgument::greedy("reason").boxed(),
    ];
    let ctx = parse(&arguments, &Identity::console(), &["2", "too", "expensive"]).unwrap();
    assert_eq!(ctx.get_int("amount"), Some(2));
    assert_eq!(ctx.get_str("reason"), Some("too expensive"));
}

#[test]
fn named_optional_argument() {
    let arguments = vec![
        StringArgument::new("item").boxed(),
        IntegerArgument::new("price").with_min(0).named().optional().boxed(),
    ];

    let ctx = parse(&arguments, &Identity::console(), &["bread", "price=4"]).unwrap();
    assert_eq!(ctx.get_int("price"), Some(4));

    let ctx = parse(&arguments, &Identity::console(), &["bread"]).unwrap();
    assert!(!ctx.has("price"));

    let err = argument_error(parse(&arguments, &Identity::console(), &["bread", "cost=4"]));
    assert_eq!(err.input(), Some("cost=4"));
    assert!(matches!(err.kind(), ArgumentErrorKind::Invalid { .. }));
}

#[test]
fn first_of_records_the_chosen_alternative() {
    let arguments = vec![
        FirstOfArgument::new(
            "target",
            vec![
                LiteralArgument::new("all").boxed(),
                NameArgument::new("player", online()).boxed(),
            ],
        )
        .unwrap()
        .boxed(),
    ];

    let ctx = parse(&arguments, &Identity::console(), &["ALL"]).unwrap();
    assert_eq!(ctx.get("target"), Some(&Value::choice("all", Value::from("all"))));

    let ctx = parse(&arguments, &Identity::console(), &["bob"]).unwrap();
    assert_eq!(ctx.get("target"), Some(&Value::choice("player", Value::from("Bob"))));
}

#[test]
fn missing_required_argument() {
    let arguments = vec![StringArgument::new("item").boxed()];
    let err = argument_error(parse(&arguments, &Identity::console(), &[]));
    assert!(err.is_missing());
    assert_eq!(err.to_string(), "Missing argument: <item>");
}
