//! Integer arguments.

use std::sync::Arc;

use parley_foundation::{ArgumentError, Invoker, Value};

use crate::argument::{Argument, ArgumentMeta, ParseResult};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// Parses a signed 64-bit integer, optionally bounded.
///
/// Tokens that are not integers are invalid. Integers outside the bounds are
/// rejected.
#[derive(Clone, Debug)]
pub struct IntegerArgument {
    meta: ArgumentMeta,
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerArgument {
    /// Accepts any integer.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
            min: None,
            max: None,
        }
    }

    /// Accepts integers of at least 1.
    #[must_use]
    pub fn positive(name: impl Into<Arc<str>>) -> Self {
        Self::new(name).with_min(1)
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Arc<str>>) -> Self {
        self.meta.set_display_name(display_name);
        self
    }

    fn in_bounds(&self, n: i64) -> bool {
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }
}

impl Argument for IntegerArgument {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn display_name(&self) -> &str {
        self.meta.display_name()
    }

    fn parse_value(
        &self,
        _invoker: &dyn Invoker,
        _context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        let Some(token) = cursor.next_token() else {
            return Err(self.missing_error().into());
        };
        let Ok(n) = token.parse::<i64>() else {
            return Err(self.invalid_error(token).into());
        };
        if !self.in_bounds(n) {
            return Err(ArgumentError::rejected(self.label(), token).into());
        }
        Ok(Some(Value::Int(n)))
    }
}
