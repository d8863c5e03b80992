#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod asset_paths;
#[cfg(not(target_arch = "wasm32"))]
pub mod builder;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod models;
pub mod project;
pub mod resolver;
#[cfg(not(target_arch = "wasm32"))]
pub mod rewrite;
#[cfg(not(target_arch = "wasm32"))]
pub mod scanning;
pub mod validation;

#[cfg(not(target_arch = "wasm32"))]
pub use builder::{PrefixRewriter, on_post_build};
#[cfg(not(target_arch = "wasm32"))]
pub use config::ProjectConfig;
pub use models::{PassKind, PassSummary, RewriteReport};
pub use project::{BuildSettings, FailurePolicy, OutputLayout};
pub use resolver::PlaceholderResolver;
pub use validation::{PrefixConfigError, on_pre_bootstrap};
