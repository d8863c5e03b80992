//! Runtime resolution of placeholders inside page-data documents.
//!
//! Page-data paths must resolve against the page that consumes them, so they are left
//! untouched at build time and rewritten here, at access time, with the prefix the bootstrap
//! discovered. The prefix is passed in explicitly rather than read from a global.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Resolves `/<sentinel>/` occurrences using the runtime-discovered prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderResolver {
  pattern: String,
  replacement: Option<String>,
}

impl PlaceholderResolver {
  /// Resolver for `sentinel`. `prefix` is `None` when no document context exists, for
  /// example while pre-rendering.
  pub fn new(sentinel: &str, prefix: Option<&str>) -> Self {
    Self {
      pattern: format!("/{sentinel}/"),
      replacement: prefix.map(|value| format!("{}/", value.trim_end_matches('/'))),
    }
  }

  /// Whether a runtime prefix is available.
  pub fn is_active(&self) -> bool {
    self.replacement.is_some()
  }

  /// Return `value` with every string leaf resolved.
  ///
  /// Without a runtime prefix the input itself is returned, borrowed and uncopied.
  /// Otherwise the result is a fresh deep copy; the input is never mutated.
  pub fn resolve<'a>(&self, value: &'a Value) -> Cow<'a, Value> {
    match &self.replacement {
      None => Cow::Borrowed(value),
      Some(replacement) => Cow::Owned(self.resolve_value(value, replacement)),
    }
  }

  /// Resolve a single string.
  pub fn resolve_str<'a>(&self, text: &'a str) -> Cow<'a, str> {
    match &self.replacement {
      Some(replacement) if text.contains(&self.pattern) => {
        Cow::Owned(text.replace(&self.pattern, replacement))
      }
      _ => Cow::Borrowed(text),
    }
  }

  fn resolve_value(&self, value: &Value, replacement: &str) -> Value {
    match value {
      Value::String(text) => Value::String(text.replace(&self.pattern, replacement)),
      Value::Array(items) => Value::Array(
        items
          .iter()
          .map(|item| self.resolve_value(item, replacement))
          .collect(),
      ),
      Value::Object(entries) => Value::Object(
        entries
          .iter()
          .map(|(key, item)| (key.clone(), self.resolve_value(item, replacement)))
          .collect::<Map<String, Value>>(),
      ),
      other => other.clone(),
    }
  }
}
