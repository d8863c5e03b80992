//! Rewrite placeholder strings in executable scripts into runtime variable references.

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::asset_paths::FileClass;
use crate::models::PassKind;
use crate::project::OutputLayout;
use crate::rewrite::{FilePass, rewrite_in_place};
use crate::scanning::TreeFile;

/// Compiled patterns for one sentinel.
#[derive(Debug, Clone)]
pub struct ScriptRelativizer {
  sentinel: String,
  standalone: Regex,
  segment: Regex,
  guard: String,
}

impl ScriptRelativizer {
  /// Compile the patterns for `sentinel`.
  pub fn new(sentinel: &str) -> Result<Self> {
    let escaped = regex::escape(sentinel);
    let standalone = Regex::new(&format!(r#""/{escaped}"|'/{escaped}'"#))
      .context("invalid standalone placeholder regex")?;
    let segment =
      Regex::new(&format!(r#"(["'])/{escaped}/"#)).context("invalid placeholder segment regex")?;

    Ok(Self {
      sentinel: sentinel.to_string(),
      standalone,
      segment,
      guard: format!("if(typeof {sentinel}===\"undefined\"){{globalThis.{sentinel}=\"\";}}\n"),
    })
  }

  /// Statement defining the runtime variable as an empty string when it is missing.
  ///
  /// Workers never see the head bootstrap, so every rewritten script starts with it.
  pub fn guard(&self) -> &str {
    &self.guard
  }

  /// Rewrite `text`, returning `None` when it does not mention the sentinel.
  ///
  /// `"/TOKEN"` becomes ` TOKEN ` and `"/TOKEN/rest"` becomes ` TOKEN + "/rest"`, keeping the
  /// original quote. The padding keeps minified neighbours such as `return"/TOKEN"` from
  /// fusing with the identifier.
  pub fn relativize(&self, text: &str) -> Option<String> {
    if self.sentinel.is_empty() || !text.contains(&self.sentinel) {
      return None;
    }

    let sentinel = self.sentinel.as_str();
    let replaced = self
      .standalone
      .replace_all(text, |_: &Captures| format!(" {sentinel} "));
    let replaced = self
      .segment
      .replace_all(&replaced, |caps: &Captures| format!(" {sentinel} + {}/", &caps[1]))
      .into_owned();

    let mut output = String::with_capacity(self.guard.len() + replaced.len());
    if !replaced.starts_with(&self.guard) {
      output.push_str(&self.guard);
    }
    output.push_str(&replaced);

    (output != text).then_some(output)
  }
}

/// Pass owning every script file of the tree.
#[derive(Debug, Clone)]
pub struct ScriptPass {
  relativizer: ScriptRelativizer,
}

impl ScriptPass {
  /// Prepare the pass for `layout`.
  pub fn new(layout: &OutputLayout) -> Result<Self> {
    Ok(Self {
      relativizer: ScriptRelativizer::new(&layout.sentinel)?,
    })
  }
}

impl FilePass for ScriptPass {
  fn kind(&self) -> PassKind {
    PassKind::Script
  }

  fn classes(&self) -> &'static [FileClass] {
    &[FileClass::Script]
  }

  fn apply(&self, file: &TreeFile) -> Result<bool> {
    let needle = Some(self.relativizer.sentinel.as_str());
    let written = rewrite_in_place(&file.path, needle, |text| self.relativizer.relativize(text))?;

    if written {
      tracing::debug!(file = %file.relative, "rewrote script placeholders");
    }
    Ok(written)
  }
}
