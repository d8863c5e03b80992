//! Static relativisation of `/<sentinel>/` references in markup and text assets.

use anyhow::Result;

use crate::asset_paths::{FileClass, relative_prefix};
use crate::models::PassKind;
use crate::project::OutputLayout;
use crate::rewrite::{FilePass, rewrite_in_place};
use crate::scanning::TreeFile;

/// Replace every `pattern` occurrence in `text` with `prefix`.
///
/// Returns `None` when `text` contains no occurrence.
pub fn relativize_placeholders(text: &str, pattern: &str, prefix: &str) -> Option<String> {
  if pattern.is_empty() || !text.contains(pattern) {
    return None;
  }
  Some(text.replace(pattern, prefix))
}

fn relativize_file(pattern: &str, file: &TreeFile) -> Result<bool> {
  let prefix = relative_prefix(&file.relative);
  let written = rewrite_in_place(&file.path, Some(pattern), |text| {
    relativize_placeholders(text, pattern, &prefix)
  })?;

  if written {
    tracing::debug!(file = %file.relative, prefix = %prefix, "relativised placeholders");
  }
  Ok(written)
}

/// Rewrites placeholder URLs in HTML documents into tree-root-relative paths.
#[derive(Debug, Clone)]
pub struct MarkupPass {
  pattern: String,
}

impl MarkupPass {
  /// Prepare the pass for `layout`.
  pub fn new(layout: &OutputLayout) -> Self {
    Self {
      pattern: layout.placeholder_pattern(),
    }
  }
}

impl FilePass for MarkupPass {
  fn kind(&self) -> PassKind {
    PassKind::Markup
  }

  fn classes(&self) -> &'static [FileClass] {
    &[FileClass::Markup]
  }

  fn apply(&self, file: &TreeFile) -> Result<bool> {
    relativize_file(&self.pattern, file)
  }
}

/// Applies the markup substitution to every other text asset.
///
/// Scripts, markup and page-data documents are owned by other passes; binary files are
/// never visited.
#[derive(Debug, Clone)]
pub struct AssetPass {
  pattern: String,
}

impl AssetPass {
  /// Prepare the pass for `layout`.
  pub fn new(layout: &OutputLayout) -> Self {
    Self {
      pattern: layout.placeholder_pattern(),
    }
  }
}

impl FilePass for AssetPass {
  fn kind(&self) -> PassKind {
    PassKind::Asset
  }

  fn classes(&self) -> &'static [FileClass] {
    &[FileClass::Text]
  }

  fn apply(&self, file: &TreeFile) -> Result<bool> {
    relativize_file(&self.pattern, file)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  const PATTERN: &str = "/__TOKEN__/";

  fn tree_file(root: &std::path::Path, relative: &str, class: FileClass) -> TreeFile {
    TreeFile {
      path: root.join(relative),
      relative: relative.into(),
      class,
    }
  }

  #[test]
  fn relativises_root_level_links() {
    let html = r#"<a href="/__TOKEN__/about/">About</a>"#;
    let updated = relativize_placeholders(html, PATTERN, &relative_prefix("index.html")).unwrap();
    assert_eq!(updated, r#"<a href="./about/">About</a>"#);
  }

  #[test]
  fn relativises_nested_references() {
    let html = r#"<img src="/__TOKEN__/img.png"><link href="/__TOKEN__/app.css">"#;
    let prefix = relative_prefix("blog/post/index.html");
    let updated = relativize_placeholders(html, PATTERN, &prefix).unwrap();
    assert_eq!(updated, r#"<img src="../../img.png"><link href="../../app.css">"#);
  }

  #[test]
  fn second_pass_finds_nothing() {
    let once = relativize_placeholders("url(/__TOKEN__/a.png)", PATTERN, "../").unwrap();
    assert!(relativize_placeholders(&once, PATTERN, "../").is_none());
    assert!(!once.contains(PATTERN));
  }

  #[test]
  fn leaves_bare_sentinel_without_trailing_slash() {
    assert!(relativize_placeholders(r#"href="/__TOKEN__""#, PATTERN, "./").is_none());
  }

  #[test]
  fn markup_pass_skips_untouched_files() {
    let dir = tempdir().unwrap();
    let layout = OutputLayout::new(dir.path()).with_sentinel("__TOKEN__");
    let file = tree_file(dir.path(), "index.html", FileClass::Markup);
    fs::write(&file.path, "<p>static</p>").unwrap();
    let before = fs::metadata(&file.path).unwrap().modified().unwrap();

    let written = MarkupPass::new(&layout).apply(&file).unwrap();

    assert!(!written);
    assert_eq!(fs::read_to_string(&file.path).unwrap(), "<p>static</p>");
    assert_eq!(fs::metadata(&file.path).unwrap().modified().unwrap(), before);
  }

  #[test]
  fn asset_pass_rewrites_stylesheets_by_depth() {
    let dir = tempdir().unwrap();
    let layout = OutputLayout::new(dir.path()).with_sentinel("__TOKEN__");
    fs::create_dir_all(dir.path().join("static/css")).unwrap();
    let file = tree_file(dir.path(), "static/css/site.css", FileClass::Text);
    fs::write(&file.path, "body{background:url(/__TOKEN__/bg.png)}").unwrap();

    let pass = AssetPass::new(&layout);
    assert!(pass.apply(&file).unwrap());
    assert_eq!(
      fs::read_to_string(&file.path).unwrap(),
      "body{background:url(../../bg.png)}"
    );
    assert_eq!(pass.classes(), &[FileClass::Text]);
  }
}
