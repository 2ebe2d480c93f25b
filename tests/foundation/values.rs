//! Integration tests for Value

use parley_foundation::Value;

#[test]
fn accessors() {
    assert_eq!(Value::from(3).as_int(), Some(3));
    assert_eq!(Value::from("Bob").as_str(), Some("Bob"));
    assert_eq!(Value::from("Bob").as_int(), None);
    assert_eq!(Value::from(3).type_name(), "int");
}

#[test]
fn choice_displays_inner_value() {
    let value = Value::choice("player", Value::from("Bob"));
    assert_eq!(value.as_choice().map(|(name, _)| name), Some("player"));
    assert_eq!(value.to_string(), "Bob");
    assert_eq!(value.type_name(), "choice");
}

#[test]
fn choice_equality_includes_alternative() {
    let a = Value::choice("player", Value::from("all"));
    let b = Value::choice("target", Value::from("all"));
    assert_ne!(a, b);
    assert_eq!(a, Value::choice("player", Value::from("all")));
}
