//! Insert the runtime prefix bootstrap at the start of every document head.

use anyhow::{Context, Result};
use regex::Regex;

use crate::asset_paths::{FileClass, relative_prefix};
use crate::models::PassKind;
use crate::project::OutputLayout;
use crate::rewrite::{FilePass, rewrite_in_place};
use crate::scanning::TreeFile;

/// Attribute identifying an injected bootstrap block.
pub const BOOTSTRAP_MARKER: &str = "data-prefix-bootstrap";

/// Result of attempting to inject the bootstrap into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
  /// The document with the bootstrap inserted.
  Inserted(String),
  /// The document already carries the bootstrap.
  AlreadyPresent,
  /// No opening head tag was found.
  MissingHead,
}

/// Builds and inserts the inline script that defines the runtime prefix variable.
#[derive(Debug, Clone)]
pub struct RuntimeInjector {
  head: Regex,
  sentinel: String,
}

impl RuntimeInjector {
  /// Prepare the bootstrap for `sentinel`.
  pub fn new(sentinel: &str) -> Result<Self> {
    let head = Regex::new(r"(?i)<head(?:\s[^>]*)?>").context("invalid head regex")?;
    Ok(Self {
      head,
      sentinel: sentinel.to_string(),
    })
  }

  /// The inline script for a document whose root-relative prefix is `prefix`.
  ///
  /// The script resolves `prefix` against the page location, so the variable holds the
  /// site's mount point (without trailing slash) wherever the tree is served from.
  pub fn script(&self, prefix: &str) -> String {
    let sentinel = &self.sentinel;
    let prefix = serde_json::to_string(prefix).unwrap_or_else(|_| "\"./\"".into());
    format!(
      "<script {BOOTSTRAP_MARKER}>(function(){{\
var p=new URL({prefix},window.location.href).pathname;\
window.{sentinel}=p.replace(/\\/$/,\"\");\
}})();</script>"
    )
  }

  /// Insert the bootstrap for `prefix` immediately after the first opening head tag.
  pub fn inject(&self, html: &str, prefix: &str) -> Injection {
    let Some(found) = self.head.find(html) else {
      return Injection::MissingHead;
    };

    let rest = &html[found.end()..];
    if rest.starts_with(&format!("<script {BOOTSTRAP_MARKER}>")) {
      return Injection::AlreadyPresent;
    }

    let script = self.script(prefix);
    let mut output = String::with_capacity(html.len() + script.len());
    output.push_str(&html[..found.end()]);
    output.push_str(&script);
    output.push_str(rest);
    Injection::Inserted(output)
  }
}

/// Pass injecting the bootstrap into every markup file, whether or not it mentions the
/// sentinel.
#[derive(Debug, Clone)]
pub struct InjectPass {
  injector: RuntimeInjector,
}

impl InjectPass {
  /// Prepare the pass for `layout`.
  pub fn new(layout: &OutputLayout) -> Result<Self> {
    Ok(Self {
      injector: RuntimeInjector::new(&layout.sentinel)?,
    })
  }
}

impl FilePass for InjectPass {
  fn kind(&self) -> PassKind {
    PassKind::Inject
  }

  fn classes(&self) -> &'static [FileClass] {
    &[FileClass::Markup]
  }

  fn apply(&self, file: &TreeFile) -> Result<bool> {
    let prefix = relative_prefix(&file.relative);
    rewrite_in_place(&file.path, None, |html| match self.injector.inject(html, &prefix) {
      Injection::Inserted(updated) => Some(updated),
      Injection::AlreadyPresent => {
        tracing::debug!(file = %file.relative, "bootstrap already present");
        None
      }
      Injection::MissingHead => {
        tracing::warn!(file = %file.relative, "no <head> tag; bootstrap not injected");
        None
      }
    })
  }
}
