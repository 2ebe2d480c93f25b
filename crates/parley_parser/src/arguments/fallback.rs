//! Arguments with a fallback.

use parley_foundation::{Invoker, Value};

use crate::argument::{Argument, MAX_SUGGESTIONS, ParseFailure, ParseResult};
use crate::arguments::DefinitionError;
use crate::context::ParseContext;
use crate::cursor::TokenCursor;
use crate::fallback::{FallbackArgument, FallbackSignal};

/// Tries an argument, and if it fails, tries another one once the rest of the
/// command has been parsed.
///
/// Any failure of the wrapped argument becomes a fallback signal. When the
/// parser resolves the signal, a nested fallback of the wrapped argument is
/// tried first, then the fallback argument. If the fallback argument reports a
/// missing value or requires a player, the wrapped argument's own error wins.
#[derive(Debug)]
pub struct TypedFallback {
    argument: Box<dyn Argument>,
    fallback: Box<dyn Argument>,
}

impl TypedFallback {
    /// Combines `argument` with `fallback`.
    ///
    /// # Errors
    ///
    /// Fails if `fallback` is itself a fallback argument.
    pub fn new(
        argument: impl Argument + 'static,
        fallback: impl Argument + 'static,
    ) -> Result<Self, DefinitionError> {
        if fallback.as_fallback().is_some() {
            return Err(DefinitionError::NestedFallback(fallback.name().to_string()));
        }
        Ok(Self::new_unchecked(argument, fallback))
    }

    pub(crate) fn new_unchecked(
        argument: impl Argument + 'static,
        fallback: impl Argument + 'static,
    ) -> Self {
        Self {
            argument: Box::new(argument),
            fallback: Box::new(fallback),
        }
    }

    /// Returns the wrapped argument.
    #[must_use]
    pub fn original(&self) -> &dyn Argument {
        &*self.argument
    }

    /// Returns the fallback argument.
    #[must_use]
    pub fn fallback(&self) -> &dyn Argument {
        &*self.fallback
    }

    fn signal(&self, failure: ParseFailure) -> ParseFailure {
        let label = self.label();
        FallbackSignal::new(label.clone(), failure.wrapped_by(label)).into()
    }

    fn store(&self, context: &mut dyn ParseContext, value: Option<Value>) -> Option<Value> {
        if let Some(value) = &value {
            context.put(self.name(), value.clone());
        }
        value
    }
}

impl Argument for TypedFallback {
    fn name(&self) -> &str {
        self.argument.name()
    }

    fn display_name(&self) -> &str {
        self.argument.display_name()
    }

    fn is_optional(&self) -> bool {
        self.argument.is_optional() || self.fallback.is_optional()
    }

    fn reduced_format(&self) -> String {
        self.argument.reduced_format()
    }

    fn parse_value(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        self.argument
            .parse_value(invoker, context, cursor)
            .map_err(|failure| self.signal(failure))
    }

    fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        let value = self
            .argument
            .parse(invoker, context, cursor)
            .map_err(|failure| self.signal(failure))?;
        Ok(self.store(context, value))
    }

    fn complete(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Vec<String> {
        let start = cursor.snapshot();
        let mut suggestions = self.argument.complete(invoker, context, cursor);
        if suggestions.len() >= MAX_SUGGESTIONS {
            suggestions.truncate(MAX_SUGGESTIONS);
            return suggestions;
        }
        let limit = MAX_SUGGESTIONS - suggestions.len();
        cursor.restore(start);
        suggestions.extend(
            self.fallback
                .complete(invoker, context, cursor)
                .into_iter()
                .take(limit),
        );
        suggestions
    }

    fn as_fallback(&self) -> Option<&dyn FallbackArgument> {
        Some(self)
    }
}

impl FallbackArgument for TypedFallback {
    fn parse_fallback(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
        signal: &FallbackSignal,
        strictly_required: bool,
    ) -> ParseResult<Option<Value>> {
        // A nested fallback of the wrapped argument goes first.
        if let (Some(original), Some(inner)) =
            (signal.original_fallback(), self.argument.as_fallback())
        {
            let start = cursor.snapshot();
            match inner.parse_fallback(invoker, context, cursor, original, strictly_required) {
                Ok(value) => return Ok(self.store(context, value)),
                Err(ParseFailure::Fallback(nested)) => return Err(nested.root_error().into()),
                Err(ParseFailure::Error(_)) => cursor.restore(start),
            }
        }

        match self.fallback.parse(invoker, context, cursor) {
            Ok(value) => Ok(self.store(context, value)),
            Err(ParseFailure::Error(err)) if err.is_missing() || err.is_requires_player() => {
                if strictly_required {
                    return Err(signal.root_error().into());
                }
                // Later arguments consumed the rest of the input, so the
                // wrapped argument may now fail differently.
                match self.argument.parse(invoker, context, cursor) {
                    Ok(value) => Ok(self.store(context, value)),
                    Err(ParseFailure::Fallback(nested)) => Err(nested.root_error().into()),
                    Err(failure) => Err(failure.wrapped_by(self.label())),
                }
            }
            Err(failure) => Err(failure.wrapped_by(self.label())),
        }
    }
}
