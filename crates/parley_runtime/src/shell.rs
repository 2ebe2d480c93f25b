//! The interactive command shell.

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use parley_command::{CommandId, CommandTree, Invocation, normalize};
use parley_foundation::{ArgumentError, Error, Identity, Invoker, MessageSink, Result};
use tracing::debug;

use crate::commands::shop_commands;
use crate::config::ShellConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::tokenize::{COMMAND_PREFIX, split_command, tokenize, tokenize_partial};

/// Words that end the session unless a command claims them.
pub const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// What the shell does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading.
    Continue,
    /// End the session.
    Exit,
}

/// Prints messages to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn send(&self, _invoker: &dyn Invoker, message: &str) {
        println!("{message}");
    }
}

/// The interactive shell.
pub struct Shell<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Commands available to the invoker.
    tree: Rc<CommandTree>,

    /// Who runs the commands.
    invoker: Rc<Identity>,

    /// Where command output goes.
    sink: Rc<dyn MessageSink>,

    /// Prompt shown before each line.
    prompt: String,

    /// Whether to show the welcome banner.
    show_banner: bool,
}

impl Shell<RustylineEditor> {
    /// Creates a shell serving the shop commands with the rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the commands cannot be registered or the editor
    /// fails to initialize.
    pub fn new(config: &ShellConfig) -> Result<Self> {
        let (tree, _state) = shop_commands(config.players.clone())?;
        let tree = Rc::new(tree);
        let invoker = Rc::new(config.identity());
        let editor =
            RustylineEditor::new(Rc::clone(&tree), Rc::clone(&invoker), config.history_size)?;
        let shell = Self::with_editor(editor, tree, invoker).with_prompt(config.prompt.clone());
        Ok(if config.banner {
            shell
        } else {
            shell.without_banner()
        })
    }
}

impl<E: LineEditor> Shell<E> {
    /// Creates a shell over `tree` with the given editor.
    pub fn with_editor(editor: E, tree: Rc<CommandTree>, invoker: Rc<Identity>) -> Self {
        Self {
            editor,
            tree,
            invoker,
            sink: Rc::new(ConsoleSink),
            prompt: "> ".to_string(),
            show_banner: true,
        }
    }

    /// Sends command output to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn MessageSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the command tree.
    #[must_use]
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Returns the invoker.
    #[must_use]
    pub fn invoker(&self) -> &Identity {
        &self.invoker
    }

    /// Runs the read loop until EOF or an exit command.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history(&line);
                    }
                    if self.execute(&line) == Flow::Exit {
                        break;
                    }
                }
                ReadResult::Interrupted => println!(),
                ReadResult::Eof => break,
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes every line of `reader`. Blank lines and lines starting with
    /// `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn run_batch(&self, reader: impl BufRead) -> Result<()> {
        for line in reader.lines() {
            let line = line.map_err(|e| Error::internal(e.to_string()))?;
            if line.trim_start().starts_with('#') {
                continue;
            }
            if self.execute(&line) == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Executes one line.
    pub fn execute(&self, line: &str) -> Flow {
        let tokens = tokenize(line);
        let Some((alias, arguments)) = split_command(&tokens) else {
            return Flow::Continue;
        };

        let Some(root) = self.tree.root(alias) else {
            return self.builtin(alias);
        };
        debug!(invoker = self.invoker.name(), line, "executing");
        let invocation = Invocation::new(&*self.invoker, root, alias, arguments.iter().cloned());
        self.tree.dispatch(&invocation, &*self.sink);
        Flow::Continue
    }

    fn builtin(&self, alias: &str) -> Flow {
        let word = normalize(alias);
        if EXIT_COMMANDS.contains(&word.as_str()) {
            return Flow::Exit;
        }
        let message = ArgumentError::unknown_command(alias).render();
        self.sink.send(&*self.invoker, &message);
        Flow::Continue
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mParley shell v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type a command such as /shop list. Use exit or Ctrl+D to leave.\n");
        let _ = io::stdout().flush();
    }
}

/// Suggests completions for the last token of a partially typed line.
///
/// The first token completes to root command aliases, keeping a typed `/`.
/// Later tokens are completed by the command tree.
#[must_use]
pub fn complete_line(tree: &CommandTree, invoker: &dyn Invoker, line: &str) -> Vec<String> {
    let tokens = tokenize_partial(line);
    if tokens.len() <= 1 {
        let typed = tokens.first().map_or("", String::as_str);
        let (prefix, partial) = match typed.strip_prefix(COMMAND_PREFIX) {
            Some(rest) => (COMMAND_PREFIX.to_string(), rest),
            None => (String::new(), typed),
        };
        return complete_root(tree, invoker, partial)
            .into_iter()
            .map(|alias| format!("{prefix}{alias}"))
            .collect();
    }

    let Some((alias, arguments)) = split_command(&tokens) else {
        return Vec::new();
    };
    let Some(root) = tree.root(alias) else {
        return Vec::new();
    };
    tree.complete(&Invocation::new(invoker, root, alias, arguments.iter().cloned()))
}

/// Suggests one matching alias per root command the invoker may use.
fn complete_root(tree: &CommandTree, invoker: &dyn Invoker, partial: &str) -> Vec<String> {
    let partial = normalize(partial);
    let mut suggested: Vec<CommandId> = Vec::new();
    let mut suggestions = Vec::new();
    for (alias, root) in tree.roots().entries() {
        if suggested.contains(&root) || !alias.starts_with(&partial) {
            continue;
        }
        suggested.push(root);
        if tree.node(root).is_some_and(|node| node.test_permission(invoker)) {
            suggestions.push(alias.to_string());
        }
    }
    suggestions
}
