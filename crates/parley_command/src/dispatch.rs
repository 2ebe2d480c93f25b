//! Running commands.
//!
//! Every entry point walks the same steps, starting at the invoked command:
//!
//! ```text
//! resolve child ──► check source ──► check permission ──► parse ──► execute
//!   (repeat while the next token is a child alias)
//! ```
//!
//! [`CommandTree::dispatch`] reports every failure to the invoker and never
//! returns an error. [`CommandTree::process`] and [`CommandTree::parse_only`]
//! return typed errors instead. [`CommandTree::complete`] collects
//! suggestions for the last token.

use std::sync::Arc;

use parley_foundation::{
    Error, ErrorKind, Invoker, Message, MessageSink, Result,
    UNEXPECTED_ERROR_MESSAGE, Value,
};
use parley_parser::{ArgumentParser, ContextMap, ParseContext, TokenCursor, complete_arguments};
use tracing::{debug, error, trace};

use crate::node::CommandNode;
use crate::registry::normalize;
use crate::tree::{CommandId, CommandTree};

/// Message sent by commands that have no executor.
pub const USAGE_MESSAGE: &str = "Usage: {usage}";

/// One use of a command: who typed which alias with which arguments.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    invoker: &'a dyn Invoker,
    command: CommandId,
    alias: String,
    arguments: Arc<[String]>,
}

impl<'a> Invocation<'a> {
    /// Creates an invocation of `command`, typed as `alias`.
    #[must_use]
    pub fn new<I, S>(invoker: &'a dyn Invoker, command: CommandId, alias: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            invoker,
            command,
            alias: alias.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the invoker.
    #[must_use]
    pub fn invoker(&self) -> &'a dyn Invoker {
        self.invoker
    }

    /// Returns the invoked command.
    #[must_use]
    pub fn command(&self) -> CommandId {
        self.command
    }

    /// Returns the alias the command was invoked with.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the argument tokens.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Returns a fresh cursor over the argument tokens.
    #[must_use]
    pub fn cursor(&self) -> TokenCursor {
        TokenCursor::from_shared(Arc::clone(&self.arguments))
    }
}

/// What an executor sees of a parsed command.
#[derive(Clone, Copy)]
pub struct Execution<'a> {
    tree: &'a CommandTree,
    command: CommandId,
    node: &'a CommandNode,
    invocation: &'a Invocation<'a>,
    context: &'a dyn ParseContext,
    sink: &'a dyn MessageSink,
}

impl<'a> Execution<'a> {
    /// Returns the command tree.
    #[must_use]
    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }

    /// Returns the executed command.
    #[must_use]
    pub fn command(&self) -> CommandId {
        self.command
    }

    /// Returns the executed command's definition.
    #[must_use]
    pub fn node(&self) -> &'a CommandNode {
        self.node
    }

    /// Returns the invocation.
    #[must_use]
    pub fn invocation(&self) -> &'a Invocation<'a> {
        self.invocation
    }

    /// Returns the invoker.
    #[must_use]
    pub fn invoker(&self) -> &'a dyn Invoker {
        self.invocation.invoker()
    }

    /// Returns the parsed argument values.
    #[must_use]
    pub fn context(&self) -> &'a dyn ParseContext {
        self.context
    }

    /// Returns the parsed value of an argument.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.context.get(name)
    }

    /// Sends plain text to the invoker.
    pub fn reply(&self, message: &str) {
        self.sink.send(self.invoker(), message);
    }

    /// Renders `message` with the command's placeholders and sends it.
    pub fn send(&self, message: &Message) {
        let rendered = message.render(&self.tree.message_args(self.command));
        self.reply(&rendered);
    }

    /// Fails unless the invoker holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NoPermission`].
    pub fn check_permission(&self, permission: &str) -> Result<()> {
        self.tree.check_permission(self.invoker(), permission)
    }
}

/// A command whose arguments were parsed but not executed.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    /// The command the input resolved to.
    pub command: CommandId,
    /// The parsed argument values.
    pub context: ContextMap,
}

/// State of one run, kept for diagnostics.
struct Run {
    command: Option<CommandId>,
    context: ContextMap,
    cursor: TokenCursor,
}

impl Run {
    fn new(invocation: &Invocation<'_>) -> Self {
        Self {
            command: None,
            context: ContextMap::new(),
            cursor: invocation.cursor(),
        }
    }
}

impl CommandTree {
    /// Runs a command and reports any failure to the invoker.
    ///
    /// Expected failures are sent as their own message. Unexpected failures
    /// are logged with full context, and the invoker only receives a generic
    /// message.
    pub fn dispatch(&self, invocation: &Invocation<'_>, sink: &dyn MessageSink) {
        let invoker = invocation.invoker();
        match self.process(invocation, sink) {
            Ok(()) => {
                debug!(
                    invoker = invoker.name(),
                    alias = invocation.alias(),
                    "command succeeded"
                );
            }
            Err(err) if err.is_unexpected() => {
                sink.send(invoker, UNEXPECTED_ERROR_MESSAGE);
                error!(
                    invoker = invoker.name(),
                    alias = invocation.alias(),
                    error = %err,
                    context = ?err.context,
                    "error during command handling"
                );
            }
            Err(err) => {
                sink.send(invoker, &err.user_message());
                debug!(
                    invoker = invoker.name(),
                    alias = invocation.alias(),
                    error = %err,
                    context = ?err.context,
                    "command failed"
                );
            }
        }
    }

    /// Runs a command, returning failures instead of reporting them.
    ///
    /// # Errors
    ///
    /// Returns the first failure of source check, permission check, parsing,
    /// or execution.
    pub fn process(&self, invocation: &Invocation<'_>, sink: &dyn MessageSink) -> Result<()> {
        let mut run = Run::new(invocation);
        self.prepare(invocation, &mut run)
            .and_then(|command| self.execute(command, invocation, &run.context, sink))
            .map_err(|err| self.finish_error(err, &run))
    }

    /// Resolves and parses a command without executing it.
    ///
    /// # Errors
    ///
    /// Returns the first failure of source check, permission check, or
    /// parsing.
    pub fn parse_only(&self, invocation: &Invocation<'_>) -> Result<ParsedCommand> {
        let mut run = Run::new(invocation);
        match self.prepare(invocation, &mut run) {
            Ok(command) => Ok(ParsedCommand {
                command,
                context: run.context,
            }),
            Err(err) => Err(self.finish_error(err, &run)),
        }
    }

    /// Suggests completions for the last, possibly partial, token.
    #[must_use]
    pub fn complete(&self, invocation: &Invocation<'_>) -> Vec<String> {
        let invoker = invocation.invoker();
        let mut cursor = invocation.cursor();
        let Ok(command) = self.resolve(invocation.command(), &mut cursor) else {
            return Vec::new();
        };
        let Some(node) = self.node(command) else {
            return Vec::new();
        };
        if !node.is_accepted(invoker) || !node.test_permission(invoker) {
            return Vec::new();
        }

        let mut suggestions = Vec::new();
        if cursor.remaining() == 1 {
            let partial = normalize(cursor.peek().unwrap_or_default());
            let mut matched: Option<CommandId> = None;
            for (alias, child) in self.children(command).into_iter().flat_map(|c| c.entries()) {
                if matched == Some(child) {
                    continue;
                }
                matched = None;
                if alias.starts_with(&partial) {
                    matched = Some(child);
                    if self.node(child).is_some_and(|n| n.test_permission(invoker)) {
                        suggestions.push(alias.to_string());
                    }
                }
            }
        }

        let mut context = ContextMap::new();
        suggestions.extend(complete_arguments(node.arguments(), invoker, &mut context, &mut cursor));
        trace!(command = %command, count = suggestions.len(), "completed");
        suggestions
    }

    /// Follows child aliases from `start` as long as the next token names one.
    fn resolve(&self, start: CommandId, cursor: &mut TokenCursor) -> Result<CommandId> {
        if self.node(start).is_none() {
            return Err(Error::internal(format!("unknown command {start}")));
        }
        let mut current = start;
        while let Some(child) = cursor
            .peek()
            .and_then(|token| self.children(current)?.get(token))
        {
            cursor.next_token();
            current = child;
        }
        Ok(current)
    }

    fn prepare(&self, invocation: &Invocation<'_>, run: &mut Run) -> Result<CommandId> {
        let invoker = invocation.invoker();
        let command = self.resolve(invocation.command(), &mut run.cursor)?;
        run.command = Some(command);
        let node = self
            .node(command)
            .ok_or_else(|| Error::internal(format!("unknown command {command}")))?;

        node.check_source(invoker)?;
        node.check_permission(invoker)?;
        ArgumentParser::new(node.arguments())
            .with_children(self.has_children(command))
            .parse(invoker, &mut run.context, &mut run.cursor)?;
        Ok(command)
    }

    fn execute(
        &self,
        command: CommandId,
        invocation: &Invocation<'_>,
        context: &ContextMap,
        sink: &dyn MessageSink,
    ) -> Result<()> {
        let node = self
            .node(command)
            .ok_or_else(|| Error::internal(format!("unknown command {command}")))?;
        let execution = Execution {
            tree: self,
            command,
            node,
            invocation,
            context,
            sink,
        };
        match node.executor() {
            Some(executor) => executor(&execution),
            None => {
                execution.send(&Message::new(USAGE_MESSAGE));
                Ok(())
            }
        }
    }

    /// Renders command messages with the command's placeholders and attaches
    /// diagnostics.
    fn finish_error(&self, err: Error, run: &Run) -> Error {
        let Error { kind, context } = err;
        let kind = match (kind, run.command) {
            (ErrorKind::SourceRejected(message), Some(command)) => {
                ErrorKind::SourceRejected(message.render(&self.message_args(command)).into())
            }
            (ErrorKind::Failed(message), Some(command)) => {
                ErrorKind::Failed(message.render(&self.message_args(command)).into())
            }
            (kind, _) => kind,
        };

        let mut diagnostics = context.unwrap_or_default();
        if let Some(command) = run.command {
            diagnostics = diagnostics.with_command(self.usage_format(command));
        }
        if let ErrorKind::Argument(argument_error) = &kind {
            for label in argument_error.chain() {
                diagnostics = diagnostics.with_frame(label.to_string());
            }
        }
        for (key, value) in run.context.iter() {
            diagnostics = diagnostics.with_value(key, format!("{value:?}"));
        }
        diagnostics = diagnostics.with_cursor(run.cursor.to_string());
        Error::new(kind).with_context(diagnostics)
    }
}
