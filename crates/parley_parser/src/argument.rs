//! The argument contract.
//!
//! An [`Argument`] consumes zero or more tokens from a [`TokenCursor`] and
//! produces a [`Value`], which [`Argument::parse`] stores in the
//! [`ParseContext`] under the argument's name. Failure is either a hard
//! [`ArgumentError`] or a [`FallbackSignal`] asking the parser to come back
//! to this argument once later arguments have been tried.

use std::fmt;
use std::sync::Arc;

use parley_foundation::{ArgumentError, ArgumentLabel, Invoker, Value};

use crate::context::ParseContext;
use crate::cursor::TokenCursor;
use crate::fallback::{FallbackArgument, FallbackSignal};

/// Upper bound on suggestions returned by composite arguments.
pub const MAX_SUGGESTIONS: usize = 20;

/// Why an argument did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Parsing failed for good.
    Error(ArgumentError),
    /// Parsing failed, but the argument can recover later.
    Fallback(FallbackSignal),
}

impl ParseFailure {
    /// Returns true for fallback signals.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Returns the underlying hard error, unwinding fallback signals.
    #[must_use]
    pub fn root_error(&self) -> ArgumentError {
        match self {
            Self::Error(err) => err.clone(),
            Self::Fallback(signal) => signal.root_error(),
        }
    }

    /// Records an enclosing argument on a hard error. Signals keep their own
    /// label.
    #[must_use]
    pub fn wrapped_by(self, label: ArgumentLabel) -> Self {
        match self {
            Self::Error(err) => Self::Error(err.wrapped_by(label)),
            Self::Fallback(signal) => Self::Fallback(signal),
        }
    }
}

impl From<ArgumentError> for ParseFailure {
    fn from(err: ArgumentError) -> Self {
        Self::Error(err)
    }
}

impl From<FallbackSignal> for ParseFailure {
    fn from(signal: FallbackSignal) -> Self {
        Self::Fallback(signal)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "{err}"),
            Self::Fallback(signal) => write!(f, "{signal}"),
        }
    }
}

/// Result of parsing an argument.
pub type ParseResult<T> = Result<T, ParseFailure>;

/// Name and display name shared by every argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentMeta {
    name: Arc<str>,
    display_name: Option<Arc<str>>,
}

impl ArgumentMeta {
    /// Creates metadata for an argument called `name`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }

    /// Returns the context key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display name, defaulting to the name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Sets the display name.
    pub fn set_display_name(&mut self, display_name: impl Into<Arc<str>>) {
        self.display_name = Some(display_name.into());
    }
}

/// Wraps a reduced format in `<>` or `[]`. Empty stays empty.
#[must_use]
pub fn format_argument(reduced: &str, optional: bool) -> String {
    if reduced.is_empty() {
        String::new()
    } else if optional {
        format!("[{reduced}]")
    } else {
        format!("<{reduced}>")
    }
}

/// Keeps the candidates that start with `prefix`, ignoring case, capped at
/// [`MAX_SUGGESTIONS`].
pub fn suggest_prefixed<'a, I>(prefix: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = prefix.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.to_lowercase().starts_with(&prefix))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// A typed, named piece of a command's input.
pub trait Argument: fmt::Debug {
    /// Context key under which the parsed value is stored.
    fn name(&self) -> &str;

    /// Name shown to invokers.
    fn display_name(&self) -> &str {
        self.name()
    }

    /// Returns true if the argument may be omitted.
    fn is_optional(&self) -> bool {
        false
    }

    /// Usage text without brackets. Empty hides the argument from usage.
    fn reduced_format(&self) -> String {
        self.display_name().to_string()
    }

    /// Usage text: `<name>` when required, `[name]` when optional.
    fn format(&self) -> String {
        format_argument(&self.reduced_format(), self.is_optional())
    }

    /// Label used to attribute errors to this argument.
    fn label(&self) -> ArgumentLabel {
        ArgumentLabel::new(self.name(), self.format()).with_display_name(self.display_name())
    }

    /// Parses a value without touching the context.
    ///
    /// `Ok(None)` means the argument parsed nothing, which only optional
    /// arguments do. On failure the caller restores the cursor.
    fn parse_value(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>>;

    /// Parses a value and stores it under [`Argument::name`].
    fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        let value = self.parse_value(invoker, &*context, cursor)?;
        if let Some(value) = &value {
            context.put(self.name(), value.clone());
        }
        Ok(value)
    }

    /// Suggestions for the token at the cursor. May move the cursor.
    fn complete(
        &self,
        _invoker: &dyn Invoker,
        _context: &dyn ParseContext,
        _cursor: &mut TokenCursor,
    ) -> Vec<String> {
        Vec::new()
    }

    /// Returns this argument as a fallback argument, if it is one.
    fn as_fallback(&self) -> Option<&dyn FallbackArgument> {
        None
    }

    /// A missing-argument error for this argument.
    fn missing_error(&self) -> ArgumentError {
        ArgumentError::missing(self.label())
    }

    /// An invalid-argument error for `input`.
    fn invalid_error(&self, input: &str) -> ArgumentError {
        ArgumentError::invalid(self.label(), input)
    }
}

impl<A: Argument + ?Sized> Argument for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn is_optional(&self) -> bool {
        (**self).is_optional()
    }

    fn reduced_format(&self) -> String {
        (**self).reduced_format()
    }

    fn format(&self) -> String {
        (**self).format()
    }

    fn label(&self) -> ArgumentLabel {
        (**self).label()
    }

    fn parse_value(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        (**self).parse_value(invoker, context, cursor)
    }

    fn parse(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        (**self).parse(invoker, context, cursor)
    }

    fn complete(
        &self,
        invoker: &dyn Invoker,
        context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Vec<String> {
        (**self).complete(invoker, context, cursor)
    }

    fn as_fallback(&self) -> Option<&dyn FallbackArgument> {
        (**self).as_fallback()
    }

    fn missing_error(&self) -> ArgumentError {
        (**self).missing_error()
    }

    fn invalid_error(&self, input: &str) -> ArgumentError {
        (**self).invalid_error(input)
    }
}
