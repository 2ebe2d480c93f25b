//! Message templates with lazily evaluated placeholders.
//!
//! A [`Message`] is a template such as `"Unknown command: {input}"`. Rendering
//! replaces each `{key}` with the value registered for `key` in a
//! [`MessageArgs`] map. Values may be eager strings or thunks; thunks run only
//! when their placeholder actually occurs in the template.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user-facing message template.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Message {
    template: Arc<str>,
}

impl Message {
    /// Creates a message from a template.
    #[must_use]
    pub fn new(template: impl Into<Arc<str>>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns true if the template is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Renders the template, substituting placeholders from `args`.
    ///
    /// Unknown placeholders are left in place, braces included. An unmatched
    /// `{` is copied literally.
    #[must_use]
    pub fn render(&self, args: &MessageArgs<'_>) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest: &str = &self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let key = &after[..close];
            match args.resolve(key) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({:?})", self.template)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

enum ArgValue<'a> {
    Eager(String),
    Lazy(Box<dyn Fn() -> String + 'a>),
}

/// Placeholder values for [`Message::render`].
///
/// Keys are matched exactly. Inserting an existing key replaces its value.
#[derive(Default)]
pub struct MessageArgs<'a> {
    entries: Vec<(String, ArgValue<'a>)>,
}

impl<'a> MessageArgs<'a> {
    /// Creates an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an eagerly evaluated value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key.into(), ArgValue::Eager(value.to_string()));
        self
    }

    /// Adds a value computed only if the placeholder is rendered.
    #[must_use]
    pub fn with_lazy(mut self, key: impl Into<String>, thunk: impl Fn() -> String + 'a) -> Self {
        self.insert(key.into(), ArgValue::Lazy(Box::new(thunk)));
        self
    }

    /// Adds every entry of `other`, replacing values with the same key.
    #[must_use]
    pub fn merged(mut self, other: MessageArgs<'a>) -> Self {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
        self
    }

    /// Returns true if a value is registered for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluates the value for `key`, running its thunk if lazy.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| match value {
                ArgValue::Eager(s) => s.clone(),
                ArgValue::Lazy(thunk) => thunk(),
            })
    }

    fn insert(&mut self, key: String, value: ArgValue<'a>) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }
}

impl fmt::Debug for MessageArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(k, _)| k))
            .finish()
    }
}
