//! The command arena.
//!
//! All commands live in a [`CommandTree`] and are addressed by [`CommandId`].
//! Each command remembers where it is attached: nowhere, as a root command, or
//! as the child of another command. Children are looked up through the
//! parent's [`CommandRegistry`].

// Command counts stay far below u32::MAX
#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use parley_foundation::{Error, Invoker, MessageArgs, Result};

use crate::node::{ARGUMENTS_SEPARATOR, COMMAND_PREFIX, CommandNode};
use crate::registry::CommandRegistry;

/// Handle to a command in a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u32);

impl CommandId {
    /// Creates an id from an arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Detached,
    Root,
    Child(CommandId),
}

#[derive(Debug)]
struct Slot {
    node: CommandNode,
    link: Link,
    children: CommandRegistry,
}

/// Owns every command and the links between them.
#[derive(Debug, Default)]
pub struct CommandTree {
    slots: Vec<Slot>,
    roots: CommandRegistry,
}

impl CommandTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached command.
    ///
    /// # Errors
    ///
    /// Fails if the command's name, aliases, or argument names are invalid.
    pub fn insert(&mut self, node: CommandNode) -> Result<CommandId> {
        node.validate()?;
        let index = u32::try_from(self.slots.len())
            .map_err(|_| Error::registration("too many commands"))?;
        self.slots.push(Slot {
            node,
            link: Link::Detached,
            children: CommandRegistry::new(),
        });
        Ok(CommandId(index))
    }

    /// Adds a command and registers it as a root command.
    ///
    /// # Errors
    ///
    /// See [`CommandTree::insert`] and [`CommandTree::register_root`].
    pub fn add_root(&mut self, node: CommandNode) -> Result<CommandId> {
        let id = self.insert(node)?;
        self.register_root(id)?;
        Ok(id)
    }

    /// Adds a command and registers it as a child of `parent`.
    ///
    /// # Errors
    ///
    /// See [`CommandTree::insert`] and [`CommandTree::register`].
    pub fn add_child(&mut self, parent: CommandId, node: CommandNode) -> Result<CommandId> {
        let id = self.insert(node)?;
        self.register(parent, id)?;
        Ok(id)
    }

    /// Registers a detached command as a root command.
    ///
    /// # Errors
    ///
    /// Fails if the command is unknown, already attached, or its name is
    /// already taken by another root command.
    pub fn register_root(&mut self, id: CommandId) -> Result<()> {
        let slot = self.slot(id)?;
        if slot.link != Link::Detached {
            return Err(Error::registration(format!(
                "command '{}' has already been registered somewhere",
                slot.node.name()
            )));
        }
        let name = slot.node.name().to_string();
        let aliases = slot.node.aliases().to_vec();
        self.roots.register(id, &name, &aliases)?;
        self.slot_mut(id)?.link = Link::Root;
        Ok(())
    }

    /// Detaches a root command.
    ///
    /// # Errors
    ///
    /// Fails if the command is not a registered root command.
    pub fn unregister_root(&mut self, id: CommandId) -> Result<()> {
        if self.slot(id)?.link != Link::Root {
            return Err(Error::registration(format!("command {id} is not a root command")));
        }
        self.roots.unregister(id)?;
        self.slot_mut(id)?.link = Link::Detached;
        Ok(())
    }

    /// Registers a detached command as a child of `parent`.
    ///
    /// The child's name must be free among its new siblings. Aliases already
    /// used by a sibling are skipped.
    ///
    /// # Errors
    ///
    /// Fails if either command is unknown, the child is already attached, the
    /// name is taken, or the child is an ancestor of `parent`.
    pub fn register(&mut self, parent: CommandId, child: CommandId) -> Result<()> {
        self.slot(parent)?;
        let slot = self.slot(child)?;
        if slot.link != Link::Detached {
            return Err(Error::registration(format!(
                "command '{}' has already been registered somewhere",
                slot.node.name()
            )));
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(Error::registration(format!(
                "command '{}' cannot become a child of its own descendant",
                slot.node.name()
            )));
        }
        let name = slot.node.name().to_string();
        let aliases = slot.node.aliases().to_vec();
        self.slot_mut(parent)?.children.register(child, &name, &aliases)?;
        self.slot_mut(child)?.link = Link::Child(parent);
        Ok(())
    }

    /// Removes `child` from `parent` and detaches it.
    ///
    /// # Errors
    ///
    /// Fails if `child` is not registered as a child of `parent`.
    pub fn unregister(&mut self, parent: CommandId, child: CommandId) -> Result<()> {
        if self.slot(child)?.link != Link::Child(parent) {
            return Err(Error::registration(format!(
                "command {child} is not registered under {parent}"
            )));
        }
        self.slot_mut(parent)?.children.unregister(child)?;
        self.slot_mut(child)?.link = Link::Detached;
        Ok(())
    }

    /// Returns the command definition.
    #[must_use]
    pub fn node(&self, id: CommandId) -> Option<&CommandNode> {
        self.slots.get(id.0 as usize).map(|slot| &slot.node)
    }

    /// Returns the parent command, if `id` is a child command.
    #[must_use]
    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        match self.slots.get(id.0 as usize)?.link {
            Link::Child(parent) => Some(parent),
            Link::Detached | Link::Root => None,
        }
    }

    /// Returns true if `id` is registered as a root command.
    #[must_use]
    pub fn is_root(&self, id: CommandId) -> bool {
        self.slots.get(id.0 as usize).is_some_and(|slot| slot.link == Link::Root)
    }

    /// Returns the children of `id`.
    #[must_use]
    pub fn children(&self, id: CommandId) -> Option<&CommandRegistry> {
        self.slots.get(id.0 as usize).map(|slot| &slot.children)
    }

    /// Returns true if `id` has at least one child.
    #[must_use]
    pub fn has_children(&self, id: CommandId) -> bool {
        self.children(id).is_some_and(|children| !children.is_empty())
    }

    /// Returns the root command registry.
    #[must_use]
    pub fn roots(&self) -> &CommandRegistry {
        &self.roots
    }

    /// Looks up a root command by alias.
    #[must_use]
    pub fn root(&self, alias: &str) -> Option<CommandId> {
        self.roots.get(alias)
    }

    /// Follows parent links up to the outermost command.
    #[must_use]
    pub fn root_of(&self, id: CommandId) -> CommandId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Returns the active aliases of `id` in registration order, name first.
    #[must_use]
    pub fn aliases_of(&self, id: CommandId) -> Vec<&str> {
        match self.slots.get(id.0 as usize).map(|slot| slot.link) {
            Some(Link::Root) => self.roots.aliases_of(id),
            Some(Link::Child(parent)) => self
                .children(parent)
                .map(|children| children.aliases_of(id))
                .unwrap_or_default(),
            Some(Link::Detached) | None => Vec::new(),
        }
    }

    /// Returns the command's format: `/` plus the names from the root down.
    #[must_use]
    pub fn command_format(&self, id: CommandId) -> String {
        let mut names: Vec<&str> = std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|command| self.node(command).map(CommandNode::name))
            .collect();
        names.reverse();
        format!("{COMMAND_PREFIX}{}", names.join(ARGUMENTS_SEPARATOR))
    }

    /// Returns the command's arguments format.
    #[must_use]
    pub fn arguments_format(&self, id: CommandId) -> String {
        self.node(id).map(CommandNode::arguments_format).unwrap_or_default()
    }

    /// Returns the command format followed by the arguments format.
    #[must_use]
    pub fn usage_format(&self, id: CommandId) -> String {
        let command = self.command_format(id);
        let arguments = self.arguments_format(id);
        if arguments.is_empty() {
            command
        } else {
            format!("{command}{ARGUMENTS_SEPARATOR}{arguments}")
        }
    }

    /// Returns the placeholders every command message may use: `{name}`,
    /// `{description}`, `{command}`, `{usage}` and `{arguments}`.
    #[must_use]
    pub fn message_args(&self, id: CommandId) -> MessageArgs<'_> {
        MessageArgs::new()
            .with_lazy("name", move || {
                self.node(id).map(|n| n.name().to_string()).unwrap_or_default()
            })
            .with_lazy("description", move || {
                self.node(id).map(|n| n.description().to_string()).unwrap_or_default()
            })
            .with_lazy("command", move || self.command_format(id))
            .with_lazy("usage", move || self.usage_format(id))
            .with_lazy("arguments", move || self.arguments_format(id))
    }

    /// Fails unless `invoker` holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NoPermission`](parley_foundation::ErrorKind::NoPermission).
    pub fn check_permission(&self, invoker: &dyn Invoker, permission: &str) -> Result<()> {
        if invoker.has_permission(permission) {
            Ok(())
        } else {
            Err(Error::no_permission())
        }
    }

    /// Returns the number of commands, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the tree holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn ancestors(&self, id: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    fn slot(&self, id: CommandId) -> Result<&Slot> {
        self.slots
            .get(id.0 as usize)
            .ok_or_else(|| Error::registration(format!("unknown command {id}")))
    }

    fn slot_mut(&mut self, id: CommandId) -> Result<&mut Slot> {
        self.slots
            .get_mut(id.0 as usize)
            .ok_or_else(|| Error::registration(format!("unknown command {id}")))
    }
}
