//! Integration tests for command completion

use std::sync::Arc;

use parley_command::{CommandNode, CommandTree, Invocation};
use parley_foundation::{Identity, InvokerKind};
use parley_parser::{NameArgument, NameDirectory};

fn tree() -> (CommandTree, parley_command::CommandId) {
    let online: Arc<dyn NameDirectory> = Arc::new(vec!["Alice", "Bob"]);
    let mut tree = CommandTree::new();
    let root = tree.add_root(CommandNode::new("mail")).unwrap();
    tree.add_child(
        root,
        CommandNode::new("send")
            .with_alias("s")
            .with_argument(NameArgument::new("player", online)),
    )
    .unwrap();
    tree.add_child(root, CommandNode::new("read")).unwrap();
    tree.add_child(root, CommandNode::new("purge").with_permission("mail.purge"))
        .unwrap();
    (tree, root)
}

fn complete(invoker: &Identity, tokens: &[&str]) -> Vec<String> {
    let (tree, root) = tree();
    tree.complete(&Invocation::new(invoker, root, "mail", tokens.iter().copied()))
}

#[test]
fn children_once_each_and_filtered() {
    let player = Identity::player("Alice");
    assert_eq!(complete(&player, &[""]), vec!["send", "read"]);
    assert_eq!(complete(&player, &["se"]), vec!["send"]);
    assert!(complete(&player, &["p"]).is_empty());

    let admin = Identity::new("Admin", InvokerKind::Player).with_permission("mail.purge");
    assert_eq!(complete(&admin, &["p"]), vec!["purge"]);
}

#[test]
fn exact_alias_descends_into_child() {
    let player = Identity::player("Alice");
    assert!(complete(&player, &["s"]).is_empty());
    assert!(complete(&player, &["send"]).is_empty());
}

#[test]
fn descends_into_child_arguments() {
    let player = Identity::player("Alice");
    assert_eq!(complete(&player, &["send", "b"]), vec!["Bob"]);
    assert_eq!(complete(&player, &["s", ""]), vec!["Alice", "Bob"]);
}

#[test]
fn nothing_after_complete_input() {
    let player = Identity::player("Alice");
    assert!(complete(&player, &["read", "x"]).is_empty());
}
