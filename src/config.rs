//! Project configuration loader describing the output tree and the prefix sentinel.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::project::{
    BuildSettings, DEFAULT_CONCURRENCY, DEFAULT_SENTINEL, FailurePolicy, OutputLayout,
};

/// File name searched for in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "relativize.config.json";

/// Discoverable project configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Build output directory, relative to the project directory.
    pub output_dir: String,
    /// Placeholder token inserted by the build tool.
    pub sentinel: String,
    /// Path prefix configured in the build tool; must contain the sentinel. Empty by default so
    /// an unconfigured project fails the pre-bootstrap check.
    pub path_prefix: String,
    /// Whether the build tool was asked to generate prefixed paths.
    pub prefix_paths: bool,
    /// Directory holding page-data documents, relative to the output directory.
    pub page_data_dir: String,
    /// Maximum number of files rewritten concurrently.
    pub concurrency: usize,
    /// Keep processing after a failing file and report every failure at the end.
    pub aggregate_errors: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output_dir: "public".into(),
            sentinel: DEFAULT_SENTINEL.into(),
            path_prefix: String::new(),
            prefix_paths: false,
            page_data_dir: "page-data".into(),
            concurrency: DEFAULT_CONCURRENCY,
            aggregate_errors: false,
        }
    }
}

impl ProjectConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing file yields the defaults. A file that exists but does not parse also yields
    /// the defaults, with a warning so the mistake does not go unnoticed.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read config");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
                None
            }
        }
    }

    /// Output directory resolved against the project directory.
    pub fn output_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.output_dir)
    }

    /// Layout description for the post-build passes.
    pub fn to_layout(&self, project_dir: &Path) -> OutputLayout {
        OutputLayout {
            output_dir: self.output_dir_path(project_dir),
            sentinel: self.sentinel.clone(),
            page_data_dir: self.page_data_dir.clone(),
            concurrency: self.concurrency,
            failure_policy: if self.aggregate_errors {
                FailurePolicy::Aggregate
            } else {
                FailurePolicy::FailFast
            },
        }
    }

    /// Settings checked by the pre-bootstrap hook.
    pub fn to_settings(&self) -> BuildSettings {
        BuildSettings {
            path_prefix: self.path_prefix.clone(),
            prefix_paths: self.prefix_paths,
        }
    }
}
