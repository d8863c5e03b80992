//! Data structures reported by the post-build passes.

use std::fmt;

use serde::Serialize;

/// The four build-time passes, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
  /// Relativise placeholder URLs in markup.
  Markup,
  /// Turn placeholder strings in scripts into runtime variable references.
  Script,
  /// Relativise placeholder URLs in remaining text assets.
  Asset,
  /// Insert the runtime bootstrap into every markup head.
  Inject,
}

impl PassKind {
  /// Fixed execution order; injection must come last.
  pub const ORDER: [PassKind; 4] = [Self::Markup, Self::Script, Self::Asset, Self::Inject];
}

impl fmt::Display for PassKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Markup => "markup",
      Self::Script => "script",
      Self::Asset => "asset",
      Self::Inject => "inject",
    };
    f.write_str(name)
  }
}

/// Outcome of a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassSummary {
  /// Which pass produced the summary.
  pub pass: PassKind,
  /// Files owned by the pass.
  pub scanned: usize,
  /// Files whose content changed and were written back.
  pub rewritten: usize,
}

/// Summary of a complete post-build run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
  /// Per-pass summaries in execution order.
  pub passes: Vec<PassSummary>,
}

impl RewriteReport {
  /// Total number of files written across all passes.
  pub fn total_rewritten(&self) -> usize {
    self.passes.iter().map(|summary| summary.rewritten).sum()
  }

  /// Summary for a given pass, if it ran.
  pub fn pass(&self, kind: PassKind) -> Option<&PassSummary> {
    self.passes.iter().find(|summary| summary.pass == kind)
  }
}
