//! In-place rewriting passes applied to the build output tree.
//!
//! Every transform is a targeted pattern replacement on raw text; content outside the matched
//! placeholder is preserved byte for byte. Pure text functions return `None` when nothing
//! changes so callers can skip the write entirely.

pub mod inject;
pub mod relative;
pub mod script;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::asset_paths::FileClass;
use crate::models::PassKind;
use crate::scanning::TreeFile;

pub use inject::{BOOTSTRAP_MARKER, InjectPass, Injection, RuntimeInjector};
pub use relative::{AssetPass, MarkupPass, relativize_placeholders};
pub use script::{ScriptPass, ScriptRelativizer};

/// A rewriting pass applied independently to each file it owns.
pub trait FilePass: Sync {
  /// Identifies the pass in logs and reports.
  fn kind(&self) -> PassKind;

  /// File classes the pass is responsible for.
  fn classes(&self) -> &'static [FileClass];

  /// Rewrite one file, returning `true` when it was written back.
  fn apply(&self, file: &TreeFile) -> Result<bool>;
}

/// Read `path`, apply `transform` and write the result back when it returns new content.
///
/// With a `needle`, files whose raw bytes do not contain it are skipped before decoding, so
/// untouched files are neither decoded nor rewritten.
pub(crate) fn rewrite_in_place<F>(path: &Path, needle: Option<&str>, transform: F) -> Result<bool>
where
  F: FnOnce(&str) -> Option<String>,
{
  let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

  if let Some(needle) = needle
    && !contains_bytes(&bytes, needle.as_bytes())
  {
    return Ok(false);
  }

  let text = String::from_utf8(bytes)
    .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
  let Some(updated) = transform(&text) else {
    return Ok(false);
  };

  fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
  Ok(true)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
  needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
