//! Study configuration.
//!
//! Configuration is a JSON document. Every field is optional and falls back
//! to [`StudyConfig::default`].
//!
//! ```json
//! {
//!   "strategies": [
//!     {"kind": "identity"},
//!     {"kind": "random", "seed": 7},
//!     {"kind": "coordinate_sort", "axis": "x"},
//!     {"kind": "min_degree"},
//!     {"kind": "max_degree"},
//!     {"kind": "cuthill_mckee", "completion": "append_by_index"}
//!   ],
//!   "parallel": true,
//!   "pivot_epsilon": 1e-5
//! }
//! ```

use crate::cholesky::{CholeskyConfig, PIVOT_EPSILON};
use crate::geom::point::Axis;
use crate::reorder::ReorderStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings of one reordering study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Strategies to compare, in report order.
    pub strategies: Vec<ReorderStrategy>,
    /// Run the strategy pipelines on the rayon thread pool.
    pub parallel: bool,
    /// Pivots with absolute value below this are clamped to zero.
    pub pivot_epsilon: f64,
}

impl StudyConfig {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                ReorderStrategy::Identity,
                ReorderStrategy::Random { seed: None },
                ReorderStrategy::CoordinateSort { axis: Axis::X },
                ReorderStrategy::MinDegree,
                ReorderStrategy::MaxDegree,
                ReorderStrategy::cuthill_mckee(),
            ],
            parallel: true,
            pivot_epsilon: PIVOT_EPSILON,
        }
    }

    /// Reads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the seed of every random strategy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        for s in self.strategies.iter_mut() {
            if let ReorderStrategy::Random { seed: slot } = s {
                *slot = Some(seed);
            }
        }
        self
    }

    pub fn cholesky_config(&self) -> CholeskyConfig {
        CholeskyConfig {
            epsilon: self.pivot_epsilon,
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.pivot_epsilon.is_finite() && self.pivot_epsilon >= 0.0,
            "pivot_epsilon must be a finite non-negative number, got {}",
            self.pivot_epsilon
        );
        Ok(())
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::CompletionPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let c = StudyConfig::default();
        assert_eq!(c.strategies.len(), 6);
        assert!(c.parallel);
        assert_eq!(c.cholesky_config(), CholeskyConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() -> Result<()> {
        let c = StudyConfig::from_json_str(r#"{"parallel": false}"#)?;
        assert!(!c.parallel);
        assert_eq!(c.strategies, StudyConfig::default().strategies);
        assert_eq!(c.pivot_epsilon, PIVOT_EPSILON);
        Ok(())
    }

    #[test]
    fn test_load_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("study.json");
        std::fs::write(
            &path,
            r#"{
                "strategies": [
                    {"kind": "min_degree"},
                    {"kind": "cuthill_mckee", "completion": "restart_bfs"}
                ],
                "pivot_epsilon": 1e-8
            }"#,
        )?;
        let c = StudyConfig::load(&path)?;
        assert_eq!(c.strategies.len(), 2);
        assert_eq!(
            c.strategies[1],
            ReorderStrategy::CuthillMcKee {
                completion: CompletionPolicy::RestartBfs,
                neighbor_order: Default::default(),
            }
        );
        assert_eq!(c.cholesky_config().epsilon, 1e-8);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(StudyConfig::from_json_str(r#"{"pivot_epsilon": -1.0}"#).is_err());
        assert!(StudyConfig::from_json_str(r#"{"strategies": [{"kind": "amd"}]}"#).is_err());
        assert!(StudyConfig::load(Path::new("/nonexistent/study.json")).is_err());
    }

    #[test]
    fn test_with_seed() {
        let strategies = StudyConfig::default().with_seed(5).strategies;
        assert!(strategies.contains(&ReorderStrategy::Random { seed: Some(5) }));
        assert!(!strategies.contains(&ReorderStrategy::Random { seed: None }));
    }
}
