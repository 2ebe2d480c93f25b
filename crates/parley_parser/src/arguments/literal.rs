//! Fixed keyword arguments.

use std::sync::Arc;

use parley_foundation::{Invoker, Value};

use crate::argument::{Argument, ArgumentMeta, ParseResult, suggest_prefixed};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// Matches one keyword, ignoring case. The parsed value is the keyword.
#[derive(Clone, Debug)]
pub struct LiteralArgument {
    meta: ArgumentMeta,
    literal: Arc<str>,
    aliases: Vec<Arc<str>>,
}

impl LiteralArgument {
    /// Creates a literal named after its keyword.
    #[must_use]
    pub fn new(literal: impl Into<Arc<str>>) -> Self {
        let literal = literal.into();
        Self {
            meta: ArgumentMeta::new(Arc::clone(&literal)),
            literal,
            aliases: Vec::new(),
        }
    }

    /// Creates a literal stored under a different name.
    #[must_use]
    pub fn keyed(name: impl Into<Arc<str>>, literal: impl Into<Arc<str>>) -> Self {
        Self {
            meta: ArgumentMeta::new(name),
            literal: literal.into(),
            aliases: Vec::new(),
        }
    }

    /// Adds an alternative spelling.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<Arc<str>>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Returns the keyword.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    fn matches(&self, token: &str) -> bool {
        token.eq_ignore_ascii_case(&self.literal)
            || self.aliases.iter().any(|a| token.eq_ignore_ascii_case(a))
    }
}

impl Argument for LiteralArgument {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn reduced_format(&self) -> String {
        self.literal.to_string()
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
        if self.matches(token) {
            Ok(Some(Value::from(Arc::clone(&self.literal))))
        } else {
            Err(self.invalid_error(token).into())
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
        suggest_prefixed(token, [&*self.literal])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextMap;
    use parley_foundation::Identity;

    #[test]
    fn matches_ignoring_case() {
        let arg = LiteralArgument::new("all").with_alias("*");
        let console = Identity::console();
        let ctx = ContextMap::new();
        for input in ["ALL", "all", "*"] {
            let mut cursor = TokenCursor::new([input]);
            assert_eq!(
                arg.parse_value(&console, &ctx, &mut cursor),
                Ok(Some(Value::from("all")))
            );
        }
        let mut cursor = TokenCursor::new(["none"]);
        assert!(arg.parse_value(&console, &ctx, &mut cursor).is_err());
    }

    #[test]
    fn format_is_the_keyword() {
        let arg = LiteralArgument::keyed("scope", "admin");
        assert_eq!(arg.name(), "scope");
        assert_eq!(arg.format(), "<admin>");
    }

    #[test]
    fn completes_last_token() {
        let arg = LiteralArgument::new("admin");
        let console = Identity::console();
        let ctx = ContextMap::new();
        assert_eq!(arg.complete(&console, &ctx, &mut TokenCursor::new(["ad"])), vec!["admin"]);
        assert!(arg.complete(&console, &ctx, &mut TokenCursor::new(["x"])).is_empty());
        assert!(arg.complete(&console, &ctx, &mut TokenCursor::new(["ad", "2"])).is_empty());
    }
}
