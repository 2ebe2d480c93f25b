//! Integration tests for dispatching, processing, and parse-only runs

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use parley_command::{CommandId, CommandNode, CommandTree, Invocation};
use parley_foundation::{
    ArgumentErrorKind, Error, ErrorKind, Identity, InvokerKind, MessageLog, NO_PERMISSION_MESSAGE,
    UNEXPECTED_ERROR_MESSAGE, Value,
};
use parley_parser::{ArgumentExt, IntegerArgument, NameArgument, NameDirectory, ParseContext};

fn online() -> Arc<dyn NameDirectory> {
    Arc::new(vec!["Alice", "Bob"])
}

struct Fixture {
    tree: CommandTree,
    root: CommandId,
    calls: Rc<RefCell<Vec<String>>>,
}

fn fixture() -> Fixture {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut tree = CommandTree::new();
    let root = tree.add_root(CommandNode::new("bank").with_alias("b")).unwrap();

    let log = Rc::clone(&calls);
    tree.add_child(
        root,
        CommandNode::new("pay")
            .with_argument(NameArgument::new("player", online()))
            .with_argument(IntegerArgument::positive("amount").or_default_value(10))
            .with_executor(move |exec| {
                let player = exec.get("player").map(ToString::to_string).unwrap_or_default();
                let amount = exec.get("amount").and_then(Value::as_int).unwrap_or_default();
                log.borrow_mut().push(format!("{player}:{amount}"));
                exec.reply(&format!("Paid {amount} to {player}"));
                Ok(())
            }),
    )
    .unwrap();

    let audit = tree
        .add_child(
            root,
            CommandNode::new("audit")
                .with_permission("bank.audit")
                .with_description("Audit tools"),
        )
        .unwrap();
    tree.add_child(
        audit,
        CommandNode::new("dump")
            .accepting([InvokerKind::Console, InvokerKind::Remote])
            .with_executor(|exec| {
                exec.check_permission("bank.dump")?;
                exec.reply("dumped");
                Ok(())
            }),
    )
    .unwrap();

    tree.add_child(
        root,
        CommandNode::new("crash").with_executor(|_| Err(Error::internal("ledger corrupted"))),
    )
    .unwrap();

    Fixture { tree, root, calls }
}

fn dispatch(fixture: &Fixture, invoker: &Identity, tokens: &[&str]) -> Vec<String> {
    let log = MessageLog::new();
    let invocation = Invocation::new(invoker, fixture.root, "bank", tokens.iter().copied());
    fixture.tree.dispatch(&invocation, &log);
    log.messages()
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn runs_child_with_default() {
    let fixture = fixture();
    let messages = dispatch(&fixture, &Identity::player("Alice"), &["PAY", "bob"]);
    assert_eq!(messages, vec!["Paid 10 to Bob"]);
    assert_eq!(*fixture.calls.borrow(), vec!["Bob:10"]);
}

#[test]
fn node_without_executor_sends_usage() {
    let fixture = fixture();
    let console = Identity::console().with_permission("*");
    let messages = dispatch(&fixture, &console, &["audit"]);
    assert_eq!(messages, vec!["Usage: /bank audit"]);
}

#[test]
fn missing_permission_is_reported() {
    let fixture = fixture();
    let player = Identity::player("Alice");
    assert_eq!(dispatch(&fixture, &player, &["audit"]), vec![NO_PERMISSION_MESSAGE]);
}

#[test]
fn executor_permission_checks() {
    let fixture = fixture();
    let remote = Identity::new("rcon", InvokerKind::Remote);
    assert_eq!(dispatch(&fixture, &remote, &["audit", "dump"]), vec![NO_PERMISSION_MESSAGE]);

    let granted = Identity::new("rcon", InvokerKind::Remote).with_permission("bank.dump");
    assert_eq!(dispatch(&fixture, &granted, &["audit", "dump"]), vec!["dumped"]);
}

#[test]
fn rejected_source_uses_default_message() {
    let fixture = fixture();
    let messages = dispatch(&fixture, &Identity::player("Alice"), &["audit", "dump"]);
    assert_eq!(messages, vec!["You cannot execute this command here!"]);
}

#[test]
fn unexpected_errors_are_hidden() {
    let fixture = fixture();
    let messages = dispatch(&fixture, &Identity::console(), &["crash"]);
    assert_eq!(messages, vec![UNEXPECTED_ERROR_MESSAGE]);
}

#[test]
fn unknown_child_and_extra_tokens() {
    let fixture = fixture();
    let alice = Identity::player("Alice");
    assert_eq!(dispatch(&fixture, &alice, &["withdraw"]), vec!["Unknown command: withdraw"]);
    assert_eq!(
        dispatch(&fixture, &alice, &["pay", "bob", "5", "now"]),
        vec!["Unexpected argument: now"]
    );
    assert!(fixture.calls.borrow().is_empty());
}

// =============================================================================
// Process and Parse-Only
// =============================================================================

#[test]
fn process_returns_typed_errors_with_context() {
    let fixture = fixture();
    let alice = Identity::player("Alice");
    let log = MessageLog::new();
    let invocation = Invocation::new(&alice, fixture.root, "bank", ["pay", "carol"]);
    let err = fixture.tree.process(&invocation, &log).unwrap_err();

    let ErrorKind::Argument(argument) = &err.kind else {
        panic!("expected argument error, got {err:?}");
    };
    assert!(matches!(argument.kind(), ArgumentErrorKind::Invalid { input } if input == "carol"));
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.command.as_deref(), Some("/bank pay <player> [amount]"));
    assert!(log.messages().is_empty());
}

#[test]
fn parse_only_does_not_execute() {
    let fixture = fixture();
    let alice = Identity::player("Alice");
    let invocation = Invocation::new(&alice, fixture.root, "b", ["pay", "alice", "7"]);
    let parsed = fixture.tree.parse_only(&invocation).unwrap();

    assert_eq!(fixture.tree.node(parsed.command).map(CommandNode::name), Some("pay"));
    assert_eq!(parsed.context.get_str("player"), Some("Alice"));
    assert_eq!(parsed.context.get_int("amount"), Some(7));
    assert!(fixture.calls.borrow().is_empty());
}
