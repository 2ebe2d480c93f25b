//! Arguments that pick a name from a known set, such as online players.

use std::fmt;
use std::sync::Arc;

use parley_foundation::{Invoker, Value};

use crate::argument::{Argument, ArgumentMeta, ParseResult, suggest_prefixed};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// A source of canonical names.
pub trait NameDirectory: fmt::Debug {
    /// Returns every known name.
    fn names(&self) -> Vec<String>;

    /// Finds the canonical spelling of `input`, ignoring case.
    fn resolve(&self, input: &str) -> Option<String> {
        self.names()
            .into_iter()
            .find(|name| name.eq_ignore_ascii_case(input))
    }
}

impl<T: AsRef<str> + fmt::Debug> NameDirectory for Vec<T> {
    fn names(&self) -> Vec<String> {
        self.iter().map(|n| n.as_ref().to_string()).collect()
    }
}

/// Parses one of the names in a [`NameDirectory`].
#[derive(Clone, Debug)]
pub struct NameArgument {
    meta: ArgumentMeta,
    directory: Arc<dyn NameDirectory>,
    min_completion_input: usize,
}

impl NameArgument {
    /// Creates an argument backed by `directory`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, directory: Arc<dyn NameDirectory>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
            directory,
            min_completion_input: 0,
        }
    }

    /// Only suggest names once the input is at least this long.
    #[must_use]
    pub fn with_min_completion_input(mut self, len: usize) -> Self {
        self.min_completion_input = len;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Arc<str>>) -> Self {
        self.meta.set_display_name(display_name);
        self
    }
}

impl Argument for NameArgument {
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
        match self.directory.resolve(token) {
            Some(name) => Ok(Some(Value::from(name))),
            None => Err(self.invalid_error(token).into()),
        }
    }

    fn complete(
        &self,
        _invoker: &dyn Invoker,
        _context: &dyn ParseContext,
        cursor: &mut TokenCursor,
    ) -> Vec<String> {
        if cursor.remaining() != 1 {
            return Vec::new();
        }
        let token = cursor.peek().unwrap_or_default();
        if token.chars().count() < self.min_completion_input {
            return Vec::new();
        }
        let names = self.directory.names();
        suggest_prefixed(token, names.iter().map(String::as_str))
    }
}
