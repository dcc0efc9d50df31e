//! Sparsity metrics used to compare orderings.

use crate::matrix::DenseMatrix;

/// Number of entries not exactly equal to zero.
pub fn nnz(m: &DenseMatrix) -> usize {
    m.as_slice().iter().filter(|&&v| v != 0.0).count()
}

/// Number of nonzero entries in the lower triangle, diagonal included.
pub fn nnz_lower(m: &DenseMatrix) -> usize {
    (0..m.dim())
        .map(|i| m.row(i)[..=i].iter().filter(|&&v| v != 0.0).count())
        .sum()
}

/// Fraction of nonzero entries over all `n²` entries.
///
/// The whole square is counted, not one triangle, so that all orderings are
/// scored on the same basis. An empty matrix has sparsity `1.0`.
pub fn sparsity(m: &DenseMatrix) -> f64 {
    let n = m.dim();
    if n == 0 {
        return 1.0;
    }
    nnz(m) as f64 / (n * n) as f64
}

/// Maximum `|i - j|` over nonzero entries (0 for diagonal or empty matrices).
pub fn bandwidth(m: &DenseMatrix) -> usize {
    let mut bw = 0;
    for i in 0..m.dim() {
        for (j, &v) in m.row(i).iter().enumerate() {
            if v != 0.0 {
                bw = bw.max(i.abs_diff(j));
            }
        }
    }
    bw
}

/// Lower-triangle nonzeros the factor has beyond those of the original.
///
/// Positions that become nonzero count as fill; numerical cancellation that
/// zeroes an original entry can make this smaller than the true fill, never
/// negative.
pub fn fill_in(original: &DenseMatrix, factor_lower: &DenseMatrix) -> usize {
    nnz_lower(factor_lower).saturating_sub(nnz_lower(original))
}
