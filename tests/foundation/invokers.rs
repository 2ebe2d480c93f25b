//! Integration tests for invokers and message sinks

use parley_foundation::{
    Identity, Invoker, InvokerKind, MessageLog, MessageSink, WILDCARD_PERMISSION,
};

#[test]
fn player_permissions() {
    let alice = Identity::player("Alice").with_permissions(["shop.list", "shop.give"]);
    assert!(alice.is_player());
    assert!(alice.has_permission("shop.give"));
    assert!(!alice.has_permission("shop.admin"));
}

#[test]
fn wildcard_grants_everything() {
    let remote = Identity::new("rcon", InvokerKind::Remote).with_permission(WILDCARD_PERMISSION);
    assert!(remote.has_permission("anything.at.all"));
    assert!(!remote.is_player());
}

#[test]
fn log_records_recipients_in_order() {
    let log = MessageLog::new();
    let alice = Identity::player("Alice");
    let console = Identity::console();
    log.send(&alice, "one");
    log.send(&console, "two");

    assert_eq!(log.messages(), vec!["one", "two"]);
    assert_eq!(log.entries()[0].0, "Alice");
    assert_eq!(log.last().as_deref(), Some("two"));

    log.clear();
    assert!(log.messages().is_empty());
}
