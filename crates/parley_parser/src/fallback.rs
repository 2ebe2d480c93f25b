//! Fallback signals and the fallback argument contract.

use std::fmt;

use parley_foundation::{ArgumentError, ArgumentLabel, Invoker, Value};

use crate::argument::{Argument, ParseFailure, ParseResult};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// Raised by an argument that failed now but may supply a value once the
/// arguments after it have been tried.
///
/// A signal wraps the failure that caused it, which may itself be a signal
/// raised by a nested argument. Arguments that try several alternatives also
/// keep every alternative's signal, keyed by the alternative's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSignal {
    argument: ArgumentLabel,
    original: Box<ParseFailure>,
    alternatives: Vec<(usize, FallbackSignal)>,
}

impl FallbackSignal {
    /// Creates a signal raised by `argument` because of `original`.
    #[must_use]
    pub fn new(argument: ArgumentLabel, original: impl Into<ParseFailure>) -> Self {
        Self {
            argument,
            original: Box::new(original.into()),
            alternatives: Vec::new(),
        }
    }

    /// Creates a signal that collects the signals of several alternatives.
    ///
    /// The first alternative becomes the original failure. Returns `None` if
    /// `alternatives` is empty.
    #[must_use]
    pub fn from_alternatives(
        argument: ArgumentLabel,
        alternatives: Vec<(usize, FallbackSignal)>,
    ) -> Option<Self> {
        let (_, first) = alternatives.first()?;
        Some(Self {
            argument,
            original: Box::new(ParseFailure::Fallback(first.clone())),
            alternatives,
        })
    }

    /// The argument that raised the signal.
    #[must_use]
    pub fn argument(&self) -> &ArgumentLabel {
        &self.argument
    }

    /// The failure that caused the signal.
    #[must_use]
    pub fn original(&self) -> &ParseFailure {
        &self.original
    }

    /// The nested signal that caused this one, if any.
    #[must_use]
    pub fn original_fallback(&self) -> Option<&FallbackSignal> {
        match &*self.original {
            ParseFailure::Fallback(signal) => Some(signal),
            ParseFailure::Error(_) => None,
        }
    }

    /// Signals of the alternatives, with their positions.
    #[must_use]
    pub fn alternatives(&self) -> &[(usize, FallbackSignal)] {
        &self.alternatives
    }

    /// The hard error at the bottom of the signal chain, attributed through
    /// every argument that raised a signal on the way up.
    #[must_use]
    pub fn root_error(&self) -> ArgumentError {
        self.original.root_error().wrapped_by(self.argument.clone())
    }
}

impl fmt::Display for FallbackSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fallback for '{}': {}", self.argument, self.original)
    }
}

/// An argument that can recover from a [`FallbackSignal`] it raised.
pub trait FallbackArgument: Argument {
    /// Supplies a recovery value and stores it under the argument's name.
    ///
    /// `strictly_required` is true when parsing the arguments after this one
    /// failed or left tokens unconsumed; the cursor has then been reset to
    /// where this argument started. Otherwise the cursor is exhausted.
    ///
    /// Must not raise another fallback signal.
    fn parse_fallback(
        &self,
        invoker: &dyn Invoker,
        context: &mut dyn ParseContext,
        cursor: &mut TokenCursor,
        signal: &FallbackSignal,
        strictly_required: bool,
    ) -> ParseResult<Option<Value>>;
}
