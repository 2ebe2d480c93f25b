//! Optional arguments.

use parley_foundation::{Invoker, Value};

use crate::argument::{Argument, ParseFailure, ParseResult};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;
use crate::fallback::{FallbackArgument, FallbackSignal};

/// Makes an argument optional: a hard failure yields no value and consumes
/// nothing.
///
/// Fallback signals from the wrapped argument are passed on, wrapped in a
/// signal of this argument, so the wrapped argument still gets to resolve them.
#[derive(Debug)]
pub struct OptionalArgument {
    argument: Box<dyn Argument>,
}

impl OptionalArgument {
    /// Wraps `argument`.
    #[must_use]
    pub fn new(argument: impl Argument + 'static) -> Self {
        Self {
            argument: Box::new(argument),
        }
    }

    /// Returns the wrapped argument.
    #[must_use]
    pub fn inner(&self) -> &dyn Argument {
        &*self.argument
    }

    fn or_nothing(
        &self,
        cursor: &mut TokenCursor,
        parse: impl FnOnce(&mut TokenCursor) -> ParseResult<Option<Value>>,
    ) -> ParseResult<Option<Value>> {
        let start = cursor.snapshot();
        match parse(cursor) {
            Ok(value) => Ok(value),
            Err(ParseFailure::Fallback(signal)) => {
                Err(FallbackSignal::new(self.label(), signal).into())
            }
            Err(ParseFailure::Error(_)) => {
                cursor.restore(start);
                Ok(None)
            }
        }
    }
}

impl Argument for OptionalArgument {
    fn name(&self) -> &str {
        self.argument.name()
    }

    fn display_name(&self) -> &str {
        self.argument.display_name()
    }

    fn is_optional(&self) -> bool {
        true
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
        self.or_nothing(cursor, |cursor| {
            self.argument.parse_value(invoker, context, cursor)
        })
    }

    fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        self.or_nothing(cursor, |cursor| self.argument.parse(invoker, context, cursor))
    }

    fn complete(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Vec<String> {
        self.argument.complete(invoker, context, cursor)
    }

    fn as_fallback(&self) -> Option<&dyn FallbackArgument> {
        Some(self)
    }
}

impl FallbackArgument for OptionalArgument {
    fn parse_fallback(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
        signal: &FallbackSignal,
        strictly_required: bool,
    ) -> ParseResult<Option<Value>> {
        // Only signals raised by the wrapped argument can be resolved here.
        // Anything else ends as a hard error.
        let (Some(original), Some(inner)) =
            (signal.original_fallback(), self.argument.as_fallback())
        else {
            return Err(signal.root_error().into());
        };

        let start = cursor.snapshot();
        match inner.parse_fallback(invoker, context, cursor, original, strictly_required) {
            Err(ParseFailure::Error(_)) => {
                cursor.restore(start);
                Ok(None)
            }
            other => other,
        }
    }
}
