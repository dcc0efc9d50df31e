//! Dense Cholesky factorization `M = L·Lᵗ`.
//!
//! The factorization peels off one pivot at a time: the pivot's square root
//! becomes `L[k][k]`, the scaled pivot row becomes column `k` of `L`, and the
//! trailing block is replaced by its Schur complement `M[k+1:, k+1:] - rᵗ·r`.
//! The next step factors that block. All of this happens in one row-major
//! buffer, so the work is an explicit loop and never recurses.
//!
//! Pattern matrices of graphs are only positive *semi*-definite (each
//! connected component contributes one zero eigenvalue), so the last pivot of
//! each component comes out as round-off around zero, with a pivot column of
//! round-off as well. A pivot with `|p| < ε` whose trailing column is also
//! within ε is clamped to zero and its column dropped. Any other pivot must be
//! strictly positive, otherwise [`Error::NonPositiveDefinite`] is reported
//! with the pivot value as found.

use crate::error::{Error, Result};
use crate::matrix::{DenseMatrix, sparsity};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Width of the band around zero in which pivots are clamped.
pub const PIVOT_EPSILON: f64 = 1e-5;

/// Numerical settings of the factorization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CholeskyConfig {
    /// Pivots below this in absolute value, over a pivot column also below
    /// it, are clamped to zero.
    pub epsilon: f64,
}

impl Default for CholeskyConfig {
    fn default() -> Self {
        Self {
            epsilon: PIVOT_EPSILON,
        }
    }
}

/// Result of a factorization.
///
/// The lower triangle, diagonal included, is the factor `L`. The buffer also
/// keeps the scaled pivot rows above the diagonal (the transpose of `L`'s
/// columns), which is what [`CholeskyFactor::sparsity`] counts over the full
/// square.
#[derive(Debug, Clone)]
pub struct CholeskyFactor {
    buf: DenseMatrix,
    clamped_pivots: usize,
}

impl CholeskyFactor {
    pub fn dim(&self) -> usize {
        self.buf.dim()
    }

    /// Entry `L[i][j]`; zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i { 0.0 } else { self.buf.get(i, j) }
    }

    /// The factor `L` with an explicitly zeroed upper triangle.
    pub fn lower(&self) -> DenseMatrix {
        self.buf.lower_triangle()
    }

    /// Computes `L·Lᵗ`, which equals the factored matrix up to round-off and
    /// clamped pivots.
    pub fn reconstruct(&self) -> DenseMatrix {
        let l = self.lower();
        let n = l.dim();
        let mut out = DenseMatrix::zeros(n);
        for i in 0..n {
            for j in 0..=i {
                let s: f64 = (0..=j).map(|k| l.get(i, k) * l.get(j, k)).sum();
                out.set(i, j, s);
                out.set(j, i, s);
            }
        }
        out
    }

    /// Fraction of nonzero entries of the factored buffer over all `n²`
    /// entries.
    pub fn sparsity(&self) -> f64 {
        sparsity(&self.buf)
    }

    /// Number of pivots that fell inside the clamp band with a nonzero value.
    pub fn clamped_pivots(&self) -> usize {
        self.clamped_pivots
    }

    /// The factored buffer, upper part included.
    pub fn as_matrix(&self) -> &DenseMatrix {
        &self.buf
    }

    pub fn into_matrix(self) -> DenseMatrix {
        self.buf
    }
}

/// Factors `m` with the default settings, consuming it.
pub fn factor(m: DenseMatrix) -> Result<CholeskyFactor> {
    factor_with(m, &CholeskyConfig::default())
}

/// Factors `m` with custom settings, consuming it.
pub fn factor_with(mut m: DenseMatrix, config: &CholeskyConfig) -> Result<CholeskyFactor> {
    let clamped_pivots = eliminate(&mut m, config.epsilon)?;
    Ok(CholeskyFactor {
        buf: m,
        clamped_pivots,
    })
}

/// Factors `m` in place with the default settings.
///
/// On success the lower triangle of `m` holds `L`. On error `m` is left
/// partially factored and must be discarded.
pub fn factor_in_place(m: &mut DenseMatrix) -> Result<()> {
    eliminate(m, PIVOT_EPSILON).map(|_| ())
}

/// Runs the elimination and returns the number of nonzero pivots clamped.
fn eliminate(m: &mut DenseMatrix, eps: f64) -> Result<usize> {
    let n = m.dim();
    let a = m.as_mut_slice();
    let mut clamped = 0;

    for k in 0..n {
        let kk = k * n + k;
        let pivot = a[kk];

        // A near-zero pivot whose trailing column also vanishes is a
        // semi-definite direction: clamp it and drop the column.
        if pivot.abs() < eps && ((k + 1)..n).all(|i| a[k * n + i].abs() < eps) {
            if pivot != 0.0 {
                debug!(index = k, value = pivot, "clamping near-zero pivot");
                clamped += 1;
            }
            a[kk] = 0.0;
            for i in (k + 1)..n {
                a[k * n + i] = 0.0;
                a[i * n + k] = 0.0;
            }
            continue;
        }
        if pivot <= 0.0 || pivot.is_nan() {
            return Err(Error::NonPositiveDefinite {
                index: k,
                value: pivot,
            });
        }

        let d = pivot.sqrt();
        a[kk] = d;

        // Scaled pivot row, mirrored into the pivot column
        for i in (k + 1)..n {
            let r = a[k * n + i] / d;
            a[k * n + i] = r;
            a[i * n + k] = r;
        }

        // Schur complement: M[k+1:, k+1:] -= rᵗ·r
        for i in (k + 1)..n {
            let ri = a[k * n + i];
            if ri == 0.0 {
                continue;
            }
            for j in (k + 1)..n {
                a[i * n + j] -= ri * a[k * n + j];
            }
        }
    }

    Ok(clamped)
}
