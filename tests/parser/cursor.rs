//! Integration tests for TokenCursor

use parley_parser::TokenCursor;

#[test]
fn walks_tokens_in_order() {
    let mut cursor = TokenCursor::new(["list", "Bob", "2"]);
    assert_eq!(cursor.len(), 3);
    assert_eq!(cursor.peek(), Some("list"));
    assert_eq!(cursor.next_token(), Some("list"));
    assert_eq!(cursor.remaining(), 2);
    assert_eq!(cursor.rest(), ["Bob".to_string(), "2".to_string()]);
}

#[test]
fn snapshot_restores_position() {
    let mut cursor = TokenCursor::new(["a", "b", "c"]);
    cursor.next_token();
    let snapshot = cursor.snapshot();
    cursor.next_token();
    cursor.next_token();
    assert!(!cursor.has_next());

    cursor.restore(snapshot);
    assert_eq!(cursor.position(), 1);
    assert_eq!(cursor.peek(), Some("b"));
}

#[test]
fn consume_rest_exhausts_cursor() {
    let mut cursor = TokenCursor::new(["too", "many", "words"]);
    cursor.next_token();
    assert_eq!(cursor.consume_rest().join(" "), "many words");
    assert_eq!(cursor.next_token(), None);
}

#[test]
fn display_shows_position() {
    let mut cursor = TokenCursor::new(["x", "y"]);
    cursor.next_token();
    assert_eq!(cursor.to_string(), r#"1/2 ["x", "y"]"#);
}
