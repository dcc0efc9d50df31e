//! Vertex permutations and their application to dense matrices.

use crate::error::{Error, Result};
use crate::matrix::DenseMatrix;

/// A bijection on `[0, n)` mapping old indices to new indices.
///
/// Both directions are stored. Every constructor validates bijectivity, so a
/// `Permutation` value always is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// The identity permutation of size `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            forward: (0..n).collect(),
            inverse: (0..n).collect(),
        }
    }

    /// Builds a permutation from its old → new mapping: `forward[old] = new`.
    pub fn from_forward(forward: Vec<usize>) -> Result<Self> {
        let inverse = invert(&forward)?;
        Ok(Self { forward, inverse })
    }

    /// Builds a permutation from a new ordering of the old indices:
    /// `order[new] = old`.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let forward = invert(&order)?;
        Ok(Self {
            forward,
            inverse: order,
        })
    }

    /// Same as [`Permutation::from_order`] for orders built by rearranging
    /// `0..n`, which are bijections by construction.
    pub(crate) fn from_order_unchecked(order: Vec<usize>) -> Self {
        let mut forward = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            forward[old] = new;
        }
        debug_assert!(invert(&forward).is_ok());
        Self {
            forward,
            inverse: order,
        }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// New index of old index `old`.
    #[inline]
    pub fn apply(&self, old: usize) -> usize {
        self.forward[old]
    }

    /// Old index placed at new index `new`.
    #[inline]
    pub fn apply_inverse(&self, new: usize) -> usize {
        self.inverse[new]
    }

    /// Old → new mapping.
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// New → old mapping, i.e. the new ordering of the old indices.
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    pub fn is_identity(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &p)| i == p)
    }
}

/// Inverts a mapping on `[0, n)`, rejecting anything that is not a bijection.
fn invert(map: &[usize]) -> Result<Vec<usize>> {
    let n = map.len();
    let mut inv = vec![usize::MAX; n];
    for (i, &p) in map.iter().enumerate() {
        if p >= n {
            return Err(Error::InvalidPermutation {
                index: i,
                reason: "maps outside the index range",
            });
        }
        if inv[p] != usize::MAX {
            return Err(Error::InvalidPermutation {
                index: i,
                reason: "maps to an already used index",
            });
        }
        inv[p] = i;
    }
    Ok(inv)
}

/// Relabels rows and columns of `m`: the result `N` satisfies
/// `N[π(i)][π(j)] = M[i][j]`.
///
/// The input is left untouched; a fresh matrix is returned.
pub fn apply_permutation(m: &DenseMatrix, perm: &Permutation) -> Result<DenseMatrix> {
    let n = m.dim();
    if perm.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: perm.len(),
        });
    }
    let mut out = DenseMatrix::zeros(n);
    for i in 0..n {
        let pi = perm.apply(i);
        for (j, &v) in m.row(i).iter().enumerate() {
            out.set(pi, perm.apply(j), v);
        }
    }
    Ok(out)
}
