//! Invoker identity and message delivery.
//!
//! Commands never talk to a concrete user system. They see an [`Invoker`]
//! (who is running the command) and a [`MessageSink`] (where replies go).

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Permission key that grants every permission.
pub const WILDCARD_PERMISSION: &str = "*";

/// The kind of entity invoking a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InvokerKind {
    /// An in-game player.
    Player,
    /// The server console.
    Console,
    /// A remote or automated caller.
    Remote,
}

impl InvokerKind {
    /// All invoker kinds.
    pub const ALL: [Self; 3] = [Self::Player, Self::Console, Self::Remote];

    /// Returns true for players.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

impl fmt::Display for InvokerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Console => "console",
            Self::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// Whoever invokes a command.
pub trait Invoker {
    /// Display name of the invoker.
    fn name(&self) -> &str;

    /// The invoker's kind.
    fn kind(&self) -> InvokerKind;

    /// Returns true if the invoker holds `permission`.
    fn has_permission(&self, permission: &str) -> bool;

    /// Returns true if the invoker is a player.
    fn is_player(&self) -> bool {
        self.kind().is_player()
    }
}

impl fmt::Debug for dyn Invoker + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.name())
    }
}

/// A simple invoker backed by an explicit permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    kind: InvokerKind,
    permissions: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity without permissions.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: InvokerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            permissions: BTreeSet::new(),
        }
    }

    /// Creates a player identity.
    #[must_use]
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, InvokerKind::Player)
    }

    /// Creates the console identity, which holds every permission.
    #[must_use]
    pub fn console() -> Self {
        Self::new("CONSOLE", InvokerKind::Console).with_permission(WILDCARD_PERMISSION)
    }

    /// Grants a permission.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Grants several permissions.
    #[must_use]
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }
}

impl Invoker for Identity {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> InvokerKind {
        self.kind
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(WILDCARD_PERMISSION) || self.permissions.contains(permission)
    }
}

/// Delivers messages to invokers.
pub trait MessageSink {
    /// Sends `message` to `invoker`.
    fn send(&self, invoker: &dyn Invoker, message: &str);
}

/// A sink that records every message, in order.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: RefCell<Vec<(String, String)>>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded messages without their recipients.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Returns the recorded (recipient, message) pairs.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.borrow().clone()
    }

    /// Returns the most recent message.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.entries.borrow().last().map(|(_, m)| m.clone())
    }

    /// Removes all recorded messages.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl MessageSink for MessageLog {
    fn send(&self, invoker: &dyn Invoker, message: &str) {
        self.entries
            .borrow_mut()
            .push((invoker.name().to_string(), message.to_string()));
    }
}
