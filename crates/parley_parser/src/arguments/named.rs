//! Arguments given explicitly as `name=value`.

use parley_foundation::{ArgumentError, Invoker, Value};

use crate::argument::{Argument, ParseFailure, ParseResult};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;
use crate::fallback::{FallbackArgument, FallbackSignal};

/// Separator between the argument name and its value.
pub const NAME_DELIMITER: &str = "=";

/// Requires the wrapped argument to be written as `name=value`.
///
/// The wrapped argument sees the token with the prefix stripped. Only
/// arguments that consume a single token are supported.
#[derive(Debug)]
pub struct NamedArgument {
    argument: Box<dyn Argument>,
}

impl NamedArgument {
    /// Wraps `argument`.
    #[must_use]
    pub fn new(argument: impl Argument + 'static) -> Self {
        Self {
            argument: Box::new(argument),
        }
    }

    fn prefix(&self) -> String {
        format!("{}{NAME_DELIMITER}", self.argument.display_name())
    }

    /// Builds a cursor over the same tokens with `prefix` stripped from the
    /// next token.
    fn stripped_cursor(
        &self,
        cursor: &TokenCursor,
        prefix: &str,
    ) -> Result<TokenCursor, ArgumentError> {
        let Some(token) = cursor.peek() else {
            return Err(self.missing_error());
        };
        let Some(value) = token.strip_prefix(prefix) else {
            return Err(self.invalid_error(token));
        };
        let mut tokens = cursor.tokens().to_vec();
        tokens[cursor.position()] = value.to_string();
        let mut stripped = TokenCursor::new(tokens);
        stripped.restore(cursor.snapshot());
        Ok(stripped)
    }

    fn with_stripped<T>(
        &self,
        cursor: &mut TokenCursor,
        parse: impl FnOnce(&mut TokenCursor) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let mut stripped = self.stripped_cursor(cursor, &self.prefix())?;
        match parse(&mut stripped) {
            Ok(value) => {
                cursor.restore(stripped.snapshot());
                Ok(value)
            }
            Err(ParseFailure::Fallback(signal)) => {
                Err(FallbackSignal::new(self.label(), signal).into())
            }
            Err(failure) => Err(failure.wrapped_by(self.label())),
        }
    }
}

impl Argument for NamedArgument {
    fn name(&self) -> &str {
        self.argument.name()
    }

    fn display_name(&self) -> &str {
        self.argument.display_name()
    }

    fn is_optional(&self) -> bool {
        self.argument.is_optional()
    }

    fn reduced_format(&self) -> String {
        format!("{}...", self.prefix())
    }

    fn parse_value(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        self.with_stripped(cursor, |stripped| {
            self.argument.parse_value(invoker, context, stripped)
        })
    }

    fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        self.with_stripped(cursor, |stripped| {
            self.argument.parse(invoker, context, stripped)
        })
    }

    fn complete(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Vec<String> {
        let Some(token) = cursor.peek() else {
            return Vec::new();
        };
        let prefix = self.prefix();
        // The prefix itself may still be partially typed.
        let typed = if prefix.starts_with(token) {
            token.to_string()
        } else {
            prefix.clone()
        };
        let Ok(mut stripped) = self.stripped_cursor(cursor, &typed) else {
            return Vec::new();
        };
        self.argument
            .complete(invoker, context, &mut stripped)
            .into_iter()
            .map(|suggestion| format!("{prefix}{suggestion}"))
            .collect()
    }

    fn as_fallback(&self) -> Option<&dyn FallbackArgument> {
        Some(self)
    }
}

impl FallbackArgument for NamedArgument {
    fn parse_fallback(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
        signal: &FallbackSignal,
        strictly_required: bool,
    ) -> ParseResult<Option<Value>> {
        let (Some(original), Some(inner)) =
            (signal.original_fallback(), self.argument.as_fallback())
        else {
            return Err(signal.root_error().into());
        };
        if !cursor.has_next() {
            return inner.parse_fallback(invoker, context, cursor, original, strictly_required);
        }
        self.with_stripped(cursor, |stripped| {
            inner.parse_fallback(invoker, context, stripped, original, strictly_required)
        })
    }
}
