//! Command definitions.
//!
//! A [`CommandNode`] describes one command: its name and aliases, who may run
//! it, the arguments it takes, and what it does. Nodes are built with `with_*`
//! methods and then handed to a [`CommandTree`](crate::CommandTree), which
//! validates them and links them into parent/child relationships.

use std::fmt;

use parley_foundation::{Error, Invoker, InvokerKind, Message, Result};
use parley_parser::Argument;

use crate::dispatch::Execution;

/// Prefix of every root command's format.
pub const COMMAND_PREFIX: &str = "/";

/// Separator between command names and arguments in formats.
pub const ARGUMENTS_SEPARATOR: &str = " ";

/// Default message for invokers a command does not accept.
pub const SOURCE_REJECTED_MESSAGE: &str = "You cannot execute this command here!";

/// Callback run once a command's arguments have been parsed.
pub type Executor = Box<dyn Fn(&Execution<'_>) -> Result<()>>;

/// Replaces the permission-key check of a command.
pub type PermissionTest = Box<dyn Fn(&dyn Invoker) -> bool>;

/// A command definition.
pub struct CommandNode {
    name: String,
    aliases: Vec<String>,
    description: String,
    permission: Option<String>,
    permission_test: Option<PermissionTest>,
    accepted_kinds: Option<Vec<InvokerKind>>,
    rejection_message: Message,
    arguments: Vec<Box<dyn Argument>>,
    executor: Option<Executor>,
}

impl CommandNode {
    /// Creates a command with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            permission: None,
            permission_test: None,
            accepted_kinds: None,
            rejection_message: Message::new(SOURCE_REJECTED_MESSAGE),
            arguments: Vec::new(),
            executor: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Requires invokers to hold `permission`.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Replaces the permission-key check with a custom predicate.
    #[must_use]
    pub fn with_permission_test(mut self, test: impl Fn(&dyn Invoker) -> bool + 'static) -> Self {
        self.permission_test = Some(Box::new(test));
        self
    }

    /// Only accepts invokers of the given kinds.
    #[must_use]
    pub fn accepting(mut self, kinds: impl IntoIterator<Item = InvokerKind>) -> Self {
        self.accepted_kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Sets the message sent to invokers the command does not accept.
    #[must_use]
    pub fn with_rejection_message(mut self, message: impl Into<Message>) -> Self {
        self.rejection_message = message.into();
        self
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Argument + 'static) -> Self {
        self.arguments.push(Box::new(argument));
        self
    }

    /// Sets the callback run after successful parsing.
    #[must_use]
    pub fn with_executor(mut self, executor: impl Fn(&Execution<'_>) -> Result<()> + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared aliases, excluding the name.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the required permission, if any.
    #[must_use]
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Returns the arguments in declaration order.
    #[must_use]
    pub fn arguments(&self) -> &[Box<dyn Argument>] {
        &self.arguments
    }

    /// Returns the argument with the given name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&dyn Argument> {
        self.arguments
            .iter()
            .find(|argument| argument.name() == name)
            .map(|argument| &**argument)
    }

    /// Returns the executor, if one was set.
    #[must_use]
    pub fn executor(&self) -> Option<&Executor> {
        self.executor.as_ref()
    }

    /// Returns true if `invoker` may run this command.
    #[must_use]
    pub fn test_permission(&self, invoker: &dyn Invoker) -> bool {
        if let Some(test) = &self.permission_test {
            return test(invoker);
        }
        self.permission
            .as_deref()
            .is_none_or(|permission| invoker.has_permission(permission))
    }

    /// Fails with a no-permission error unless `invoker` may run this command.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NoPermission`](parley_foundation::ErrorKind::NoPermission).
    pub fn check_permission(&self, invoker: &dyn Invoker) -> Result<()> {
        if self.test_permission(invoker) {
            Ok(())
        } else {
            Err(Error::no_permission())
        }
    }

    /// Returns true if the command accepts invokers of this kind.
    #[must_use]
    pub fn is_accepted(&self, invoker: &dyn Invoker) -> bool {
        self.accepted_kinds
            .as_ref()
            .is_none_or(|kinds| kinds.contains(&invoker.kind()))
    }

    /// Fails with the rejection message unless the command accepts `invoker`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SourceRejected`](parley_foundation::ErrorKind::SourceRejected).
    pub fn check_source(&self, invoker: &dyn Invoker) -> Result<()> {
        if self.is_accepted(invoker) {
            Ok(())
        } else {
            Err(Error::source_rejected(self.rejection_message.clone()))
        }
    }

    /// Returns the non-empty argument formats joined by a space.
    #[must_use]
    pub fn arguments_format(&self) -> String {
        self.arguments
            .iter()
            .map(|argument| argument.format())
            .filter(|format| !format.is_empty())
            .collect::<Vec<_>>()
            .join(ARGUMENTS_SEPARATOR)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::registration("command name is empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(Error::registration(format!(
                "command name '{}' contains whitespace",
                self.name
            )));
        }
        for alias in &self.aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(Error::registration(format!(
                    "command '{}' has an empty alias or an alias with whitespace",
                    self.name
                )));
            }
        }
        for (index, argument) in self.arguments.iter().enumerate() {
            if self.arguments[..index]
                .iter()
                .any(|other| other.name() == argument.name())
            {
                return Err(Error::registration(format!(
                    "command '{}' declares argument '{}' twice",
                    self.name,
                    argument.name()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .field("accepted_kinds", &self.accepted_kinds)
            .field("arguments", &self.arguments)
            .field("has_executor", &self.executor.is_some())
            .finish_non_exhaustive()
    }
}
