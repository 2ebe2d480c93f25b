//! Free-form text arguments.

use std::sync::Arc;

use parley_foundation::{Invoker, Value};

use crate::argument::{Argument, ArgumentMeta, ParseResult};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// Accepts any single token, or every remaining token joined by spaces.
#[derive(Clone, Debug)]
pub struct StringArgument {
    meta: ArgumentMeta,
    join_remaining: bool,
}

impl StringArgument {
    /// Accepts one token.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
            join_remaining: false,
        }
    }

    /// Accepts all remaining tokens.
    #[must_use]
    pub fn greedy(name: impl Into<Arc<str>>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
            join_remaining: true,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Arc<str>>) -> Self {
        self.meta.set_display_name(display_name);
        self
    }
}

impl Argument for StringArgument {
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
        if !cursor.has_next() {
            return Err(self.missing_error().into());
        }
        let text = if self.join_remaining {
            cursor.consume_rest().join(" ")
        } else {
            cursor.next_token().unwrap_or_default().to_string()
        };
        Ok(Some(Value::from(text)))
    }
}
