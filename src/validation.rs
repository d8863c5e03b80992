//! Pre-bootstrap checks run before the build touches any file.

use thiserror::Error;

use crate::project::BuildSettings;

/// Fatal configuration problems detected before the build starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrefixConfigError {
  /// The sentinel doubles as a runtime variable name and must be a script identifier.
  #[error("sentinel `{0}` is not a valid script identifier")]
  InvalidSentinel(String),

  /// The configured path prefix does not embed the sentinel.
  #[error("path prefix `{path_prefix}` must contain the sentinel `{sentinel}`")]
  MissingSentinel {
    /// Path prefix supplied by the build tool.
    path_prefix: String,
    /// Sentinel that was expected inside it.
    sentinel: String,
  },

  /// The build was started without prefixed-path generation.
  #[error("prefixed paths are disabled; rerun the build with prefixed paths enabled")]
  PrefixPathsDisabled,
}

/// Validate host settings before any file is produced or rewritten.
pub fn on_pre_bootstrap(settings: &BuildSettings, sentinel: &str) -> Result<(), PrefixConfigError> {
  if !is_script_identifier(sentinel) {
    return Err(PrefixConfigError::InvalidSentinel(sentinel.to_string()));
  }

  if !settings.path_prefix.contains(sentinel) {
    return Err(PrefixConfigError::MissingSentinel {
      path_prefix: settings.path_prefix.clone(),
      sentinel: sentinel.to_string(),
    });
  }

  if !settings.prefix_paths {
    return Err(PrefixConfigError::PrefixPathsDisabled);
  }

  tracing::debug!(path_prefix = %settings.path_prefix, "prefix configuration accepted");
  Ok(())
}

fn is_script_identifier(value: &str) -> bool {
  let mut chars = value.chars();
  let Some(first) = chars.next() else {
    return false;
  };

  (first.is_ascii_alphabetic() || first == '_' || first == '$')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn settings(path_prefix: &str, prefix_paths: bool) -> BuildSettings {
    BuildSettings {
      path_prefix: path_prefix.into(),
      prefix_paths,
    }
  }

  #[test]
  fn accepts_prefix_containing_sentinel() {
    let result = on_pre_bootstrap(&settings("/__TOKEN__", true), "__TOKEN__");
    assert_eq!(result, Ok(()));
  }

  #[test]
  fn rejects_prefix_without_sentinel() {
    let result = on_pre_bootstrap(&settings("/blog", true), "__TOKEN__");
    assert_eq!(
      result,
      Err(PrefixConfigError::MissingSentinel {
        path_prefix: "/blog".into(),
        sentinel: "__TOKEN__".into(),
      })
    );
  }

  #[test]
  fn rejects_builds_without_prefix_paths() {
    let result = on_pre_bootstrap(&settings("/__TOKEN__", false), "__TOKEN__");
    assert_eq!(result, Err(PrefixConfigError::PrefixPathsDisabled));
  }

  #[test]
  fn missing_sentinel_is_reported_before_disabled_flag() {
    let result = on_pre_bootstrap(&settings("", false), "__TOKEN__");
    assert!(matches!(result, Err(PrefixConfigError::MissingSentinel { .. })));
  }

  #[test]
  fn rejects_sentinels_that_cannot_name_a_variable() {
    for sentinel in ["", "1abc", "has-dash", "with space"] {
      let result = on_pre_bootstrap(&settings("/x", true), sentinel);
      assert_eq!(
        result,
        Err(PrefixConfigError::InvalidSentinel(sentinel.to_string()))
      );
    }
    assert!(is_script_identifier("$prefix_1"));
  }

  #[test]
  fn error_messages_name_the_offending_values() {
    let err = PrefixConfigError::MissingSentinel {
      path_prefix: "/blog".into(),
      sentinel: "__TOKEN__".into(),
    };
    assert_eq!(
      err.to_string(),
      "path prefix `/blog` must contain the sentinel `__TOKEN__`"
    );
  }
}
