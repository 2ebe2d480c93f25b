//! Integration tests for parse contexts

use parley_foundation::Value;
use parley_parser::{BufferedContext, ContextMap, ParseContext};

#[test]
fn buffered_writes_stay_hidden_until_applied() {
    let mut parent = ContextMap::new();
    parent.put("player", Value::from("Bob"));

    {
        let mut buffered = BufferedContext::new(&mut parent);
        buffered.put("page", Value::from(2));
        assert_eq!(buffered.get_str("player"), Some("Bob"));
        assert_eq!(buffered.get_int("page"), Some(2));
        assert!(!buffered.parent().has("page"));
        buffered.apply();
        assert!(buffered.buffer().is_empty());
    }

    assert_eq!(parent.get_int("page"), Some(2));
}

#[test]
fn discarded_writes_never_reach_parent() {
    let mut parent = ContextMap::new();
    {
        let mut buffered = BufferedContext::new(&mut parent);
        buffered.put("page", Value::from(2));
        buffered.discard();
        assert!(!buffered.has("page"));
    }
    assert!(parent.is_empty());
}

#[test]
fn buffered_entries_merge_over_parent() {
    let mut parent: ContextMap = [("player", "Bob")].into_iter().collect();
    let mut buffered = BufferedContext::new(&mut parent);
    buffered.put("player", Value::from("Alice"));
    let entries = buffered.entries();
    assert_eq!(entries, vec![("player".to_string(), Value::from("Alice"))]);
}
