//! Integration tests for message templates

use std::cell::Cell;

use parley_foundation::{Message, MessageArgs};

#[test]
fn renders_known_placeholders() {
    let message = Message::new("{name} costs {price}");
    let args = MessageArgs::new().with("name", "bread").with("price", 2);
    assert_eq!(message.render(&args), "bread costs 2");
}

#[test]
fn keeps_unknown_placeholders_and_stray_braces() {
    let message = Message::new("{known} {unknown} {");
    let args = MessageArgs::new().with("known", "yes");
    assert_eq!(message.render(&args), "yes {unknown} {");
}

#[test]
fn lazy_values_run_only_when_used() {
    let calls = Cell::new(0);
    let args = MessageArgs::new().with_lazy("usage", || {
        calls.set(calls.get() + 1);
        "/shop list".to_string()
    });

    assert_eq!(Message::new("plain").render(&args), "plain");
    assert_eq!(calls.get(), 0);

    assert_eq!(Message::new("Usage: {usage}").render(&args), "Usage: /shop list");
    assert_eq!(calls.get(), 1);
}

#[test]
fn merged_args_override() {
    let base = MessageArgs::new().with("a", 1).with("b", 2);
    let merged = base.merged(MessageArgs::new().with("b", 3));
    assert_eq!(merged.len(), 2);
    assert_eq!(Message::new("{a}{b}").render(&merged), "13");
}
