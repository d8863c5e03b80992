//! Layout of the build output tree and the settings supplied by the host build tool.

use std::path::{Path, PathBuf};

/// Default sentinel inserted upstream in place of the unknown deployment prefix.
pub const DEFAULT_SENTINEL: &str = "__IPFS_PATH_PREFIX__";

/// Default number of files processed concurrently within a pass.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// How a pass reacts to per-file failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Abort the pass on the first failing file.
  #[default]
  FailFast,
  /// Visit every file, then fail with a single error listing every failure.
  Aggregate,
}

/// Owned description of the output tree being rewritten.
#[derive(Debug, Clone)]
pub struct OutputLayout {
  /// Root directory of the emitted site (`public/` by convention).
  pub output_dir: PathBuf,
  /// Placeholder token standing in for the deployment prefix.
  pub sentinel: String,
  /// Directory under the root that holds structured page-data documents.
  pub page_data_dir: String,
  /// Upper bound on files processed at the same time.
  pub concurrency: usize,
  /// Behaviour when a file cannot be read or written.
  pub failure_policy: FailurePolicy,
}

impl OutputLayout {
  /// Layout rooted at `output_dir` with default settings for everything else.
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
      sentinel: DEFAULT_SENTINEL.into(),
      page_data_dir: "page-data".into(),
      concurrency: DEFAULT_CONCURRENCY,
      failure_policy: FailurePolicy::default(),
    }
  }

  /// Replace the sentinel token.
  pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
    self.sentinel = sentinel.into();
    self
  }

  /// Replace the failure policy.
  pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
    self.failure_policy = policy;
    self
  }

  /// The absolute placeholder form, `/<sentinel>/`, that static passes rewrite.
  pub fn placeholder_pattern(&self) -> String {
    format!("/{}/", self.sentinel)
  }

  /// Concurrency clamped so a zero setting still makes progress.
  pub fn effective_concurrency(&self) -> usize {
    self.concurrency.max(1)
  }

  /// Express `path` relative to the output root with forward slashes.
  ///
  /// Paths outside the root are returned as given, normalised to forward slashes.
  pub fn relative_path(&self, path: &Path) -> String {
    let relative = path.strip_prefix(&self.output_dir).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
  }
}

/// Values the host build tool hands over before bootstrapping.
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
  /// Configured path prefix; must embed the sentinel.
  pub path_prefix: String,
  /// Whether prefixed-path generation was requested for this build.
  pub prefix_paths: bool,
}
