//! Integration tests for command registration

use parley_command::{CommandNode, CommandTree};
use parley_foundation::ErrorKind;
use parley_parser::{ArgumentExt, IntegerArgument};

#[test]
fn aliases_resolve_case_insensitively() {
    let mut tree = CommandTree::new();
    let shop = tree
        .add_root(CommandNode::new("Shop").with_aliases(["s", "store"]))
        .unwrap();
    assert_eq!(tree.root("SHOP"), Some(shop));
    assert_eq!(tree.root("Store"), Some(shop));
    assert_eq!(tree.aliases_of(shop), vec!["shop", "s", "store"]);
}

#[test]
fn taken_aliases_are_skipped_but_names_conflict() {
    let mut tree = CommandTree::new();
    let shop = tree.add_root(CommandNode::new("shop")).unwrap();
    let list = tree
        .add_child(shop, CommandNode::new("list").with_alias("l"))
        .unwrap();
    let lock = tree
        .add_child(shop, CommandNode::new("lock").with_alias("l"))
        .unwrap();

    let children = tree.children(shop).unwrap();
    assert_eq!(children.get("l"), Some(list));
    assert_eq!(tree.aliases_of(lock), vec!["lock"]);

    let err = tree.add_child(shop, CommandNode::new("LIST")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Registration(_)));
}

#[test]
fn unregistering_frees_aliases() {
    let mut tree = CommandTree::new();
    let shop = tree.add_root(CommandNode::new("shop")).unwrap();
    let list = tree
        .add_child(shop, CommandNode::new("list").with_alias("l"))
        .unwrap();

    tree.unregister(shop, list).unwrap();
    assert!(tree.children(shop).is_some_and(|c| c.get("l").is_none()));
    assert_eq!(tree.parent(list), None);
    assert!(!tree.has_children(shop));

    let lock = tree
        .add_child(shop, CommandNode::new("lock").with_alias("l"))
        .unwrap();
    assert_eq!(tree.children(shop).and_then(|c| c.get("l")), Some(lock));
}

#[test]
fn detached_commands_can_move() {
    let mut tree = CommandTree::new();
    let shop = tree.add_root(CommandNode::new("shop")).unwrap();
    let admin = tree.add_child(shop, CommandNode::new("admin")).unwrap();
    let reload = tree.insert(CommandNode::new("reload")).unwrap();

    assert_eq!(tree.command_format(reload), "/reload");
    tree.register(admin, reload).unwrap();
    assert_eq!(tree.command_format(reload), "/shop admin reload");
    assert_eq!(tree.root_of(reload), shop);

    assert!(tree.register(shop, reload).is_err());
    tree.unregister(admin, reload).unwrap();
    tree.register(shop, reload).unwrap();
    assert_eq!(tree.parent(reload), Some(shop));
}

#[test]
fn cycles_are_rejected() {
    let mut tree = CommandTree::new();
    let shop = tree.add_root(CommandNode::new("shop")).unwrap();
    let admin = tree.add_child(shop, CommandNode::new("admin")).unwrap();
    tree.unregister_root(shop).unwrap();

    assert!(tree.register(admin, shop).is_err());
    assert!(tree.register(shop, shop).is_err());
    assert!(tree.root("shop").is_none());
}

#[test]
fn invalid_nodes_are_rejected() {
    let mut tree = CommandTree::new();
    assert!(tree.add_root(CommandNode::new("")).is_err());
    assert!(tree.add_root(CommandNode::new("two words")).is_err());
    assert!(
        tree.add_root(
            CommandNode::new("dup")
                .with_argument(IntegerArgument::new("n"))
                .with_argument(IntegerArgument::new("n")),
        )
        .is_err()
    );
    assert!(tree.roots().is_empty());
}

#[test]
fn usage_formats() {
    let mut tree = CommandTree::new();
    let shop = tree.add_root(CommandNode::new("shop")).unwrap();
    let give = tree
        .add_child(
            shop,
            CommandNode::new("give")
                .with_argument(IntegerArgument::positive("amount"))
                .with_argument(IntegerArgument::new("times").optional()),
        )
        .unwrap();
    assert_eq!(tree.arguments_format(give), "<amount> [times]");
    assert_eq!(tree.usage_format(give), "/shop give <amount> [times]");
    assert_eq!(tree.usage_format(shop), "/shop");
}
