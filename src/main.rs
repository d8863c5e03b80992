//! Command-line entry points for the two build lifecycle hooks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use prefix_relativizer::{FailurePolicy, ProjectConfig, on_post_build, on_pre_bootstrap};

/// Make a static site build servable from an unknown path prefix.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
  /// Project directory containing the config file and build output
  #[arg(short = 'C', long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
  project: PathBuf,

  /// Explicit config file (default: <project>/relativize.config.json)
  #[arg(long, value_hint = clap::ValueHint::FilePath)]
  config: Option<PathBuf>,

  /// Log every rewritten file
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Validate the prefix configuration before the build starts
  Check {
    /// Path prefix configured in the build tool
    #[arg(long)]
    path_prefix: Option<String>,

    /// The build was started with prefixed paths enabled
    #[arg(long)]
    prefix_paths: bool,
  },

  /// Rewrite the finished build output in place
  Rewrite {
    /// Output directory (relative to the project directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    output: Option<PathBuf>,

    /// Process every file and report all failures instead of stopping at the first
    #[arg(long)]
    aggregate_errors: bool,

    /// Print the pass summary as JSON
    #[arg(long)]
    json: bool,
  },
}

fn init_tracing(verbose: bool) {
  let level = if verbose { Level::DEBUG } else { Level::INFO };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .with_target(false)
    .compact()
    .init();
}

fn load_config(cli: &Cli) -> Result<ProjectConfig> {
  match &cli.config {
    Some(path) => ProjectConfig::from_path(path)
      .with_context(|| format!("failed to load config from {}", path.display())),
    None => Ok(ProjectConfig::discover(&cli.project)),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  let config = load_config(&cli)?;

  match cli.command {
    Command::Check {
      path_prefix,
      prefix_paths,
    } => {
      let mut settings = config.to_settings();
      if let Some(path_prefix) = path_prefix {
        settings.path_prefix = path_prefix;
      }
      settings.prefix_paths |= prefix_paths;

      on_pre_bootstrap(&settings, &config.sentinel)?;
      tracing::info!(path_prefix = %settings.path_prefix, "prefix configuration is valid");
    }
    Command::Rewrite {
      output,
      aggregate_errors,
      json,
    } => {
      let mut layout = config.to_layout(&cli.project);
      if let Some(output) = output {
        layout.output_dir = cli.project.join(output);
      }
      if aggregate_errors {
        layout.failure_policy = FailurePolicy::Aggregate;
      }

      let report = on_post_build(layout)?;
      if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
      }
    }
  }

  Ok(())
}
