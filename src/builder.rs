//! Post-build orchestrator running every rewriting pass over the output tree.

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::models::{PassKind, PassSummary, RewriteReport};
use crate::project::{FailurePolicy, OutputLayout};
use crate::rewrite::{AssetPass, FilePass, InjectPass, MarkupPass, ScriptPass};
use crate::scanning::collect_files_of;

/// Runs the markup, script, asset and injection passes in that order.
pub struct PrefixRewriter {
  layout: OutputLayout,
  pool: ThreadPool,
}

impl PrefixRewriter {
  /// Create a rewriter with a worker pool bounded by the layout's concurrency.
  pub fn new(layout: OutputLayout) -> Result<Self> {
    let pool = ThreadPoolBuilder::new()
      .num_threads(layout.effective_concurrency())
      .thread_name(|index| format!("relativize-{index}"))
      .build()
      .context("failed to create rewrite worker pool")?;

    Ok(Self { layout, pool })
  }

  /// Layout the rewriter operates on.
  pub fn layout(&self) -> &OutputLayout {
    &self.layout
  }

  /// Run all passes. The first failing pass aborts the remaining ones.
  pub fn run(&self) -> Result<RewriteReport> {
    let mut report = RewriteReport::default();

    for kind in PassKind::ORDER {
      let summary = match kind {
        PassKind::Markup => self.run_pass(&MarkupPass::new(&self.layout))?,
        PassKind::Script => self.run_pass(&ScriptPass::new(&self.layout)?)?,
        PassKind::Asset => self.run_pass(&AssetPass::new(&self.layout))?,
        PassKind::Inject => self.run_pass(&InjectPass::new(&self.layout)?)?,
      };
      report.passes.push(summary);
    }

    Ok(report)
  }

  /// Scan the tree afresh and apply `pass` to every file it owns.
  pub fn run_pass<P: FilePass>(&self, pass: &P) -> Result<PassSummary> {
    let kind = pass.kind();
    let files = collect_files_of(&self.layout, pass.classes())
      .with_context(|| format!("{kind} pass could not scan the output tree"))?;

    let outcomes: Vec<bool> = match self.layout.failure_policy {
      FailurePolicy::FailFast => self.pool.install(|| {
        files
          .par_iter()
          .map(|file| pass.apply(file))
          .collect::<Result<Vec<bool>>>()
      })?,
      FailurePolicy::Aggregate => {
        let results: Vec<Result<bool>> =
          self.pool.install(|| files.par_iter().map(|file| pass.apply(file)).collect());
        collect_aggregated(kind, results)?
      }
    };

    let summary = PassSummary {
      pass: kind,
      scanned: files.len(),
      rewritten: outcomes.into_iter().filter(|written| *written).count(),
    };
    tracing::info!(
      pass = %kind,
      scanned = summary.scanned,
      rewritten = summary.rewritten,
      "pass complete"
    );
    Ok(summary)
  }
}

fn collect_aggregated(kind: PassKind, results: Vec<Result<bool>>) -> Result<Vec<bool>> {
  let mut outcomes = Vec::with_capacity(results.len());
  let mut failures = Vec::new();

  for result in results {
    match result {
      Ok(written) => outcomes.push(written),
      Err(err) => failures.push(format!("{err:#}")),
    }
  }

  if failures.is_empty() {
    return Ok(outcomes);
  }

  Err(anyhow!(
    "{kind} pass failed for {} file(s):\n  {}",
    failures.len(),
    failures.join("\n  ")
  ))
}

/// Post-build hook: rewrite the output tree described by `layout`.
pub fn on_post_build(layout: OutputLayout) -> Result<RewriteReport> {
  let rewriter = PrefixRewriter::new(layout)?;
  let report = rewriter.run()?;
  tracing::info!(
    rewritten = report.total_rewritten(),
    root = %rewriter.layout().output_dir.display(),
    "output tree relativised"
  );
  Ok(report)
}
