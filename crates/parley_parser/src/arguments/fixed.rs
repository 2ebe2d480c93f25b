//! Arguments that consume no input.

use std::sync::Arc;

use parley_foundation::{ArgumentError, Invoker, Value};

use crate::argument::{Argument, ArgumentMeta, ParseResult};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// Always yields the same value. Hidden from usage.
#[derive(Clone, Debug)]
pub struct FixedValueArgument {
    meta: ArgumentMeta,
    value: Value,
}

impl FixedValueArgument {
    /// Creates an argument that yields `value`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
            value: value.into(),
        }
    }
}

impl Argument for FixedValueArgument {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn reduced_format(&self) -> String {
        String::new()
    }

    fn parse_value(
        &self,
        _invoker: &dyn Invoker,
        _context: &dyn ParseContext,
        _cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        Ok(Some(self.value.clone()))
    }
}

/// Yields the invoker's name if the invoker is a player. Hidden from usage.
#[derive(Clone, Debug)]
pub struct InvokerNameArgument {
    meta: ArgumentMeta,
}

impl InvokerNameArgument {
    /// Creates the argument.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
        }
    }
}

impl Argument for InvokerNameArgument {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn reduced_format(&self) -> String {
        String::new()
    }

    fn parse_value(
        &self,
        invoker: &dyn Invoker,
        _context: &dyn ParseContext,
        _cursor: &mut TokenCursor,
    ) -> ParseResult<Option<Value>> {
        if invoker.is_player() {
            Ok(Some(Value::from(invoker.name())))
        } else {
            Err(ArgumentError::requires_player(self.label()).into())
        }
    }
}
