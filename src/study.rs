//! Reordering study: run every configured strategy on one graph and score the
//! resulting Cholesky factors.
//!
//! The pattern matrix is built once from the reference ordering and shared
//! read-only. Each strategy works on its own permuted copy, so the pipelines
//! are independent and can run in parallel.

use crate::cholesky::{CholeskyConfig, factor_with};
use crate::config::StudyConfig;
use crate::error::Error;
use crate::graph::AdjacencyView;
use crate::matrix::{DenseMatrix, bandwidth, build_pattern_matrix, fill_in, nnz_lower};
use crate::perm::apply_permutation;
use crate::reorder::ReorderStrategy;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Scores of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub name: String,
    /// Matrix dimension (number of vertices).
    pub dimension: usize,
    /// Lower-triangle nonzeros of the reordered pattern matrix.
    pub nnz_pattern: usize,
    /// Lower-triangle nonzeros of the factor.
    pub nnz_factor: usize,
    /// Nonzeros the factorization added.
    pub fill_in: usize,
    /// Bandwidth of the reordered pattern matrix.
    pub bandwidth: usize,
    /// Nonzero fraction of the factored matrix over the full square.
    pub sparsity: f64,
    /// Pivots clamped to zero.
    pub clamped_pivots: usize,
}

/// Outcome of one strategy: its report, or the error that stopped it.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub strategy: ReorderStrategy,
    pub result: Result<StrategyReport, Error>,
}

impl StrategyOutcome {
    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }
}

/// Reorders `pattern` with `strategy`, factors the copy and scores it.
pub fn run_strategy<G: AdjacencyView + ?Sized>(
    strategy: &ReorderStrategy,
    graph: &G,
    pattern: &DenseMatrix,
    config: &CholeskyConfig,
) -> Result<StrategyReport, Error> {
    debug!(strategy = strategy.name(), dimension = pattern.dim(), "reordering");
    let perm = strategy.compute_permutation(graph)?;
    let reordered = apply_permutation(pattern, &perm)?;
    let nnz_pattern = nnz_lower(&reordered);
    let bw = bandwidth(&reordered);

    let factor = factor_with(reordered.clone(), config)?;
    let lower = factor.lower();

    let report = StrategyReport {
        name: strategy.name().to_string(),
        dimension: pattern.dim(),
        nnz_pattern,
        nnz_factor: nnz_lower(&lower),
        fill_in: fill_in(&reordered, &lower),
        bandwidth: bw,
        sparsity: factor.sparsity(),
        clamped_pivots: factor.clamped_pivots(),
    };
    info!(
        strategy = strategy.name(),
        sparsity = report.sparsity,
        fill_in = report.fill_in,
        bandwidth = report.bandwidth,
        "strategy finished"
    );
    Ok(report)
}

/// Runs every strategy of `config` on `graph`.
///
/// Outcomes are returned in configuration order. A failing strategy is
/// reported in its outcome and does not stop the others.
pub fn run_study<G: AdjacencyView + Sync + ?Sized>(
    graph: &G,
    config: &StudyConfig,
) -> Vec<StrategyOutcome> {
    let pattern = build_pattern_matrix(graph);
    let chol = config.cholesky_config();
    info!(
        vertices = graph.vertex_count(),
        strategies = config.strategies.len(),
        parallel = config.parallel,
        "starting reordering study"
    );

    let run = |strategy: &ReorderStrategy| {
        let result = run_strategy(strategy, graph, &pattern, &chol);
        if let Err(e) = &result {
            warn!(strategy = strategy.name(), error = %e, "strategy failed");
        }
        StrategyOutcome {
            strategy: *strategy,
            result,
        }
    };

    if config.parallel {
        config.strategies.par_iter().map(run).collect()
    } else {
        config.strategies.iter().map(run).collect()
    }
}
