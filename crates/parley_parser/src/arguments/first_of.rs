//! Alternatives: the first argument that parses wins.

use std::sync::Arc;

use parley_foundation::{ArgumentError, Invoker, Value};

use crate::argument::{Argument, ArgumentMeta, MAX_SUGGESTIONS, ParseFailure, ParseResult};
use crate::arguments::DefinitionError;
use crate::context::ParseContext;
use crate::cursor::{CursorSnapshot, TokenCursor};
use crate::fallback::{FallbackArgument, FallbackSignal};

/// Separator between alternative formats.
pub const FORMAT_DELIMITER: &str = "|";

/// Stores the value of the first alternative that parses something, as a
/// [`Value::Choice`] naming that alternative.
///
/// An alternative that yields no value does not stop the search, but if no
/// alternative yields a value, no value is not an error either. Otherwise a
/// rejected value is reported before any other error. Fallback signals of the
/// alternatives are collected into one signal and resolved together.
#[derive(Debug)]
pub struct FirstOfArgument {
    meta: ArgumentMeta,
    arguments: Vec<Box<dyn Argument>>,
    join_formats: bool,
    reverse_format: bool,
}

#[derive(Default)]
struct Attempts {
    fallbacks: Vec<(usize, FallbackSignal)>,
    parsed_nothing: bool,
    rejected: Option<ArgumentError>,
    first_error: Option<ArgumentError>,
}

impl FirstOfArgument {
    /// Creates the argument from its alternatives, in priority order.
    ///
    /// # Errors
    ///
    /// Fails if `arguments` is empty.
    pub fn new(
        name: impl Into<Arc<str>>,
        arguments: Vec<Box<dyn Argument>>,
    ) -> Result<Self, DefinitionError> {
        let meta = ArgumentMeta::new(name);
        if arguments.is_empty() {
            return Err(DefinitionError::NoAlternatives(meta.name().to_string()));
        }
        Ok(Self {
            meta,
            arguments,
            join_formats: true,
            reverse_format: false,
        })
    }

    /// Uses the argument's own name as its format instead of joining the
    /// alternatives' formats.
    #[must_use]
    pub fn without_joined_format(mut self) -> Self {
        self.join_formats = false;
        self
    }

    /// Lists the alternatives' formats last to first.
    #[must_use]
    pub fn with_reversed_format(mut self) -> Self {
        self.reverse_format = true;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Arc<str>>) -> Self {
        self.meta.set_display_name(display_name);
        self
    }

    /// Returns the alternatives.
    #[must_use]
    pub fn alternatives(&self) -> &[Box<dyn Argument>] {
        &self.arguments
    }

    fn first_of(
        &self,
        indices: impl IntoIterator<Item = usize>,
        cursor: &mut TokenCursor,
        resolving: bool,
        mut attempt: impl FnMut(usize, &mut TokenCursor) -> ParseResult<Option<Value>>,
    ) -> ParseResult<Option<Value>> {
        let start: CursorSnapshot = cursor.snapshot();
        let mut attempts = Attempts::default();

        for index in indices {
            match attempt(index, cursor) {
                Ok(Some(value)) => {
                    let chosen = self.arguments.get(index).map_or("", |a| a.name());
                    return Ok(Some(Value::choice(chosen, value)));
                }
                Ok(None) => attempts.parsed_nothing = true,
                Err(ParseFailure::Fallback(signal)) => {
                    if resolving {
                        return Err(signal.into());
                    }
                    attempts.fallbacks.push((index, signal));
                }
                Err(ParseFailure::Error(err)) => {
                    if err.is_rejected() {
                        attempts.rejected.get_or_insert(err);
                    } else {
                        attempts.first_error.get_or_insert(err);
                    }
                }
            }
            cursor.restore(start);
        }

        if let Some(signal) = FallbackSignal::from_alternatives(self.label(), attempts.fallbacks) {
            return Err(signal.into());
        }
        if attempts.parsed_nothing {
            return Ok(None);
        }
        let err = attempts
            .rejected
            .or(attempts.first_error)
            .unwrap_or_else(|| self.missing_error());
        Err(err.wrapped_by(self.label()).into())
    }

    fn store(&self, context: &mut dyn ParseContext, value: Option<Value>) -> Option<Value> {
        if let Some(value) = &value {
            context.put(self.name(), value.clone());
        }
        value
    }
}

impl Argument for FirstOfArgument {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn display_name(&self) -> &str {
        self.meta.display_name()
    }

    fn is_optional(&self) -> bool {
        self.arguments.iter().any(|a| a.is_optional())
    }

    fn reduced_format(&self) -> String {
        if !self.join_formats {
            return self.display_name().to_string();
        }
        let formats = self
            .arguments
            .iter()
            .map(|a| a.reduced_format())
            .filter(|f| !f.is_empty());
        let formats: Vec<String> = if self.reverse_format {
            formats.rev().collect()
        } else {
            formats.collect()
        };
        formats.join(FORMAT_DELIMITER)
    }

    fn parse_value(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        self.first_of(0..self.arguments.len(), cursor, false, |index, cursor| {
            self.arguments[index].parse_value(invoker, context, cursor)
        })
    }

    fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        let value = self.first_of(0..self.arguments.len(), cursor, false, |index, cursor| {
            self.arguments[index].parse(invoker, &mut *context, cursor)
        })?;
        Ok(self.store(context, value))
    }

    fn complete(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Vec<String> {
        let start = cursor.snapshot();
        let mut suggestions = Vec::new();
        for argument in &self.arguments {
            let limit = MAX_SUGGESTIONS.saturating_sub(suggestions.len());
            if limit == 0 {
                break;
            }
            cursor.restore(start);
            suggestions.extend(argument.complete(invoker, context, cursor).into_iter().take(limit));
        }
        suggestions
    }

    fn as_fallback(&self) -> Option<&dyn FallbackArgument> {
        Some(self)
    }
}

impl FallbackArgument for FirstOfArgument {
    fn parse_fallback(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
        signal: &FallbackSignal,
        strictly_required: bool,
    ) -> ParseResult<Option<Value>> {
        let alternatives = signal.alternatives();
        if alternatives.is_empty() {
            return Err(signal.root_error().into());
        }

        let value = self.first_of(
            alternatives.iter().map(|(index, _)| *index),
            cursor,
            true,
            |index, cursor| {
                let nested = alternatives.iter().find(|(i, _)| *i == index).map(|(_, s)| s);
                match (nested, self.arguments.get(index).and_then(|a| a.as_fallback())) {
                    (Some(nested), Some(argument)) => argument.parse_fallback(
                        invoker,
                        &mut *context,
                        cursor,
                        nested,
                        strictly_required,
                    ),
                    _ => Err(signal.root_error().into()),
                }
            },
        )?;
        Ok(self.store(context, value))
    }
}
