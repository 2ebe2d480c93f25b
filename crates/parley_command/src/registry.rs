//! Alias lookup for a command's children.

use parley_foundation::{Error, Result};
use tracing::debug;

use crate::tree::CommandId;

/// Normalizes an alias for lookup.
#[must_use]
pub fn normalize(alias: &str) -> String {
    alias.to_lowercase()
}

/// Maps normalized aliases to commands, in registration order.
///
/// All aliases of one command are stored next to each other. A command's name
/// must not collide with any registered alias, while a colliding alias is
/// skipped and stays with the command that registered it first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: Vec<CommandId>,
    aliases: Vec<(String, CommandId)>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` under `name` and whichever `aliases` are still free.
    ///
    /// # Errors
    ///
    /// Fails if `id` is already registered or `name` is already taken.
    pub fn register(&mut self, id: CommandId, name: &str, aliases: &[String]) -> Result<()> {
        if self.contains(id) {
            return Err(Error::registration(format!("command '{name}' is already registered")));
        }
        let name = normalize(name);
        if self.get(&name).is_some() {
            return Err(Error::registration(format!(
                "another command is already registered as '{name}'"
            )));
        }
        self.aliases.push((name.clone(), id));
        for alias in aliases {
            let alias = normalize(alias);
            if self.get(&alias).is_none() {
                self.aliases.push((alias, id));
            } else {
                debug!(command = %name, alias = %alias, "skipping alias already in use");
            }
        }
        self.commands.push(id);
        Ok(())
    }

    /// Removes `id` and every alias that maps to it.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not registered here.
    pub fn unregister(&mut self, id: CommandId) -> Result<()> {
        let Some(position) = self.commands.iter().position(|c| *c == id) else {
            return Err(Error::registration(format!("command {id} is not registered here")));
        };
        self.commands.remove(position);
        self.aliases.retain(|(_, command)| *command != id);
        Ok(())
    }

    /// Looks up a command by alias, ignoring case.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<CommandId> {
        let alias = normalize(alias);
        self.aliases
            .iter()
            .find(|(registered, _)| *registered == alias)
            .map(|(_, id)| *id)
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: CommandId) -> bool {
        self.commands.contains(&id)
    }

    /// Returns the registered commands in registration order.
    #[must_use]
    pub fn commands(&self) -> &[CommandId] {
        &self.commands
    }

    /// Iterates over `(normalized alias, command)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, CommandId)> {
        self.aliases.iter().map(|(alias, id)| (alias.as_str(), *id))
    }

    /// Returns the normalized aliases currently mapped to `id`, name first.
    #[must_use]
    pub fn aliases_of(&self, id: CommandId) -> Vec<&str> {
        self.entries()
            .filter(|(_, command)| *command == id)
            .map(|(alias, _)| alias)
            .collect()
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
