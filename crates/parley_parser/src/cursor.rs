//! Replayable reader over input tokens.

use std::fmt;
use std::sync::Arc;

/// Opaque cursor position captured by [`TokenCursor::snapshot`].
///
/// Snapshots compare by position, so two snapshots of the same cursor are
/// equal exactly when no tokens were consumed between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorSnapshot(usize);

impl CursorSnapshot {
    /// Returns the captured position.
    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }
}

/// Reads tokens in order from an immutable token sequence.
///
/// The sequence is shared, so cloning a cursor is cheap and yields an
/// independent reader at the same position.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenCursor {
    tokens: Arc<[String]>,
    position: usize,
}

impl TokenCursor {
    /// Creates a cursor at the start of `tokens`.
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_shared(tokens.into_iter().map(Into::into).collect())
    }

    /// Creates a cursor over an already shared token sequence.
    #[must_use]
    pub fn from_shared(tokens: Arc<[String]>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Returns every token, consumed or not.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the shared token sequence.
    #[must_use]
    pub fn shared_tokens(&self) -> Arc<[String]> {
        Arc::clone(&self.tokens)
    }

    /// Returns the index of the next token.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the total number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of unconsumed tokens.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Returns true if at least one token is unconsumed.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    /// Consumes and returns the next token, or `None` if exhausted.
    pub fn next_token(&mut self) -> Option<&str> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Returns the unconsumed tokens without consuming them.
    #[must_use]
    pub fn rest(&self) -> &[String] {
        &self.tokens[self.position..]
    }

    /// Consumes every remaining token.
    pub fn consume_rest(&mut self) -> &[String] {
        let start = self.position;
        self.position = self.tokens.len();
        &self.tokens[start..]
    }

    /// Captures the current position.
    #[must_use]
    pub const fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot(self.position)
    }

    /// Resets the position to a previously captured snapshot.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.0.min(self.tokens.len());
    }
}

impl fmt::Debug for TokenCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCursor")
            .field("tokens", &self.tokens)
            .field("position", &self.position)
            .finish()
    }
}

impl fmt::Display for TokenCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {:?}", self.position, self.tokens.len(), self.tokens)
    }
}
