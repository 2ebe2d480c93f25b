//! Parse contexts: where arguments store their parsed values.
//!
//! A [`ContextMap`] is a plain insertion-ordered store. A [`BufferedContext`]
//! layers a local buffer over a parent context: reads fall through to the
//! parent, writes stay in the buffer until [`BufferedContext::apply`] merges
//! them.

use std::fmt;

use parley_foundation::Value;

/// Key-value store for parsed argument values.
pub trait ParseContext {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: Value);

    /// Returns every entry in insertion order.
    fn entries(&self) -> Vec<(String, Value)>;

    /// Returns true if a value is stored under `key`.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the integer stored under `key`.
    fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Returns the string stored under `key`.
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl fmt::Debug for dyn ParseContext + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// An insertion-ordered map of parsed values.
///
/// Overwriting a key keeps its original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextMap {
    entries: Vec<(String, Value)>,
}

impl ContextMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Writes every entry into `target`, in insertion order.
    pub fn apply_to(self, target: &mut dyn ParseContext) {
        for (key, value) in self.entries {
            target.put(&key, value);
        }
    }
}

impl ParseContext for ContextMap {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn put(&mut self, key: &str, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    fn entries(&self) -> Vec<(String, Value)> {
        self.entries.clone()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContextMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.put(&k.into(), v.into());
        }
        map
    }
}

/// A context whose writes are held back from its parent.
pub struct BufferedContext<'p> {
    parent: &'p mut dyn ParseContext,
    buffer: ContextMap,
}

impl<'p> BufferedContext<'p> {
    /// Wraps `parent` with an empty buffer.
    pub fn new(parent: &'p mut dyn ParseContext) -> Self {
        Self {
            parent,
            buffer: ContextMap::new(),
        }
    }

    /// Returns the buffered entries.
    #[must_use]
    pub fn buffer(&self) -> &ContextMap {
        &self.buffer
    }

    /// Returns the parent context.
    #[must_use]
    pub fn parent(&self) -> &dyn ParseContext {
        &*self.parent
    }

    /// Merges the buffer into the parent and clears it.
    pub fn apply(&mut self) {
        std::mem::take(&mut self.buffer).apply_to(&mut *self.parent);
    }

    /// Clears the buffer without touching the parent.
    pub fn discard(&mut self) {
        self.buffer.clear();
    }

    /// Releases the parent, returning the unapplied buffer.
    #[must_use]
    pub fn into_buffer(self) -> ContextMap {
        self.buffer
    }
}

impl ParseContext for BufferedContext<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.buffer.get(key).or_else(|| self.parent.get(key))
    }

    fn put(&mut self, key: &str, value: Value) {
        self.buffer.put(key, value);
    }

    fn entries(&self) -> Vec<(String, Value)> {
        let mut merged: ContextMap = self.parent.entries().into_iter().collect();
        for (key, value) in self.buffer.iter() {
            merged.put(key, value.clone());
        }
        merged.entries
    }
}

impl fmt::Debug for BufferedContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedContext")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}
