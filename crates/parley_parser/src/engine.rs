//! The argument parser.
//!
//! Arguments are parsed in declaration order. When an argument raises a
//! [`FallbackSignal`], parsing continues with the following arguments inside a
//! [`BufferedContext`], and the signal stays pending. A pending fallback is
//! resolved once a later argument fails or no arguments are left:
//!
//! ```text
//!   arg[i] raises fallback ──► parse arg[i+1..] into buffer
//!                                      │
//!                     later arg fails, or last arg reached
//!                                      │
//!                                      ▼
//!                 parse_fallback(strict = failed || input left)
//!                                      │
//!        ┌──────────────┬──────────────┼───────────────────┐
//!        ▼              ▼              ▼                   ▼
//!   input left,    fallback fails   fallback consumed   fallback consumed
//!   none consumed                   input               nothing
//!        │              │              │                   │
//!   arg[i]'s own   that error      drop buffer,        apply buffer,
//!   root error                     resume at i+1       keep the later
//!                                                      outcome
//! ```
//!
//! Each pending fallback owns one level of recursion: the buffered context of
//! a fallback borrows the context of the level that raised it, so nested
//! fallbacks resolve innermost first.

use parley_foundation::{ArgumentError, Error, Invoker, Result};
use tracing::trace;

use crate::argument::{Argument, ParseFailure};
use crate::context::{BufferedContext, ContextMap, ParseContext};
use crate::cursor::{CursorSnapshot, TokenCursor};
use crate::fallback::FallbackSignal;

/// Parses a command's arguments from a token cursor.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentParser<'a> {
    arguments: &'a [Box<dyn Argument>],
    has_children: bool,
}

/// Where parsing stopped inside a pending fallback.
struct Unwind {
    index: usize,
    error: Option<ArgumentError>,
}

enum Attempt {
    Parsed,
    Failed(ArgumentError),
    Fallback(FallbackSignal, CursorSnapshot),
}

struct Pending {
    index: usize,
    signal: FallbackSignal,
    snapshot: CursorSnapshot,
    buffer: ContextMap,
}

impl<'a> ArgumentParser<'a> {
    /// Creates a parser for `arguments`.
    #[must_use]
    pub fn new(arguments: &'a [Box<dyn Argument>]) -> Self {
        Self {
            arguments,
            has_children: false,
        }
    }

    /// Whether the command has child commands. Leftover input is then
    /// reported as an unknown command.
    #[must_use]
    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    /// Parses every argument into `context`.
    ///
    /// # Errors
    ///
    /// Returns the argument error that ended parsing, an error for leftover
    /// input, or an internal error if a fallback argument breaks its contract.
    pub fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Result<()> {
        self.parse_from(0, false, invoker, context, cursor)?;
        self.check_unparsed(&*context, cursor)
    }

    /// Parses every argument into a fresh context.
    ///
    /// # Errors
    ///
    /// See [`ArgumentParser::parse`].
    pub fn parse_to_map(&self, invoker: &dyn Invoker, cursor: &mut TokenCursor) -> Result<ContextMap> {
        let mut context = ContextMap::new();
        self.parse(invoker, &mut context, cursor)?;
        Ok(context)
    }

    fn attempt(
        &self,
        index: usize,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Attempt {
        let argument = &self.arguments[index];
        let start = cursor.snapshot();
        match argument.parse(invoker, context, cursor) {
            Ok(_) => Attempt::Parsed,
            Err(ParseFailure::Error(err)) => {
                cursor.restore(start);
                Attempt::Failed(err)
            }
            Err(ParseFailure::Fallback(signal)) => {
                cursor.restore(start);
                trace!(argument = argument.name(), index, %signal, "fallback pending");
                Attempt::Fallback(signal, start)
            }
        }
    }

    fn parse_from(
        &self,
        start: usize,
        nested: bool,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Result<Unwind> {
        let last = self.arguments.len().saturating_sub(1);
        let mut index = start;

        while index < self.arguments.len() {
            let (current, error) = match self.attempt(index, invoker, &mut *context, cursor) {
                Attempt::Parsed => (index, None),
                Attempt::Failed(err) => (index, Some(err)),
                Attempt::Fallback(signal, snapshot) => {
                    let mut buffered = BufferedContext::new(&mut *context);
                    let unwind = self.parse_from(index + 1, true, invoker, &mut buffered, cursor)?;
                    let pending = Pending {
                        index,
                        signal,
                        snapshot,
                        buffer: buffered.into_buffer(),
                    };
                    self.resolve(pending, unwind, invoker, &mut *context, cursor)?
                }
            };

            if let Some(err) = error {
                if nested {
                    return Ok(Unwind {
                        index: current,
                        error: Some(err),
                    });
                }
                return Err(err.into());
            }
            if nested && current >= last {
                return Ok(Unwind {
                    index: current,
                    error: None,
                });
            }
            index = current + 1;
        }

        Ok(Unwind {
            index: last,
            error: None,
        })
    }

    /// Resolves a pending fallback. Returns the argument index and failure
    /// that parsing continues from.
    fn resolve(
        &self,
        pending: Pending,
        unwind: Unwind,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Result<(usize, Option<ArgumentError>)> {
        let Pending {
            index,
            signal,
            snapshot,
            buffer,
        } = pending;
        let argument = &self.arguments[index];
        let Some(fallback) = argument.as_fallback() else {
            return Err(Error::internal(format!(
                "argument '{}' raised a fallback signal but cannot resolve it",
                argument.name()
            )));
        };

        let strictly_required = unwind.error.is_some() || cursor.has_next();
        let before = cursor.snapshot();
        if strictly_required {
            cursor.restore(snapshot);
        }
        let had_remaining = cursor.has_next();
        let entry = cursor.snapshot();

        trace!(argument = argument.name(), index, strictly_required, "resolving fallback");
        let error = match fallback.parse_fallback(invoker, context, cursor, &signal, strictly_required) {
            Ok(_) => None,
            Err(ParseFailure::Error(err)) => {
                cursor.restore(entry);
                Some(err)
            }
            Err(ParseFailure::Fallback(nested)) => {
                return Err(Error::internal(format!(
                    "argument '{}' raised another fallback while resolving one: {nested}",
                    argument.name()
                )));
            }
        };
        let consumed = cursor.snapshot() != entry;

        if had_remaining && !consumed {
            let root = signal.root_error();
            trace!(argument = argument.name(), %root, "fallback left input unconsumed");
            return Ok((index, Some(root)));
        }
        if let Some(err) = error {
            trace!(argument = argument.name(), %err, "fallback failed");
            return Ok((index, Some(err)));
        }
        if consumed {
            trace!(argument = argument.name(), "fallback consumed input, reparsing after it");
            return Ok((index, None));
        }

        trace!(argument = argument.name(), "fallback resolved without input");
        buffer.apply_to(context);
        cursor.restore(before);
        Ok((unwind.index, unwind.error))
    }

    fn check_unparsed(&self, context: &dyn ParseContext, cursor: &TokenCursor) -> Result<()> {
        let Some(token) = cursor.peek() else {
            return Ok(());
        };
        if self.has_children {
            return Err(ArgumentError::unknown_command(token).into());
        }
        // Earliest argument of the trailing run of arguments without a value.
        let first_unparsed = self
            .arguments
            .iter()
            .rev()
            .take_while(|argument| !context.has(argument.name()))
            .last();
        match first_unparsed {
            Some(argument) => Err(argument.invalid_error(token).into()),
            None => Err(ArgumentError::unexpected(token).into()),
        }
    }
}
