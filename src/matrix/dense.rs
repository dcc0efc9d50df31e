use crate::error::{Error, Result};
use ndarray as nd;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Square matrix stored densely in one row-major buffer.
///
/// Deserialization checks that the buffer holds exactly `dim²` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct DenseMatrix {
    dim: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for DenseMatrix {
    type Error = Error;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        let expected = raw.dim.checked_mul(raw.dim).unwrap_or(usize::MAX);
        if raw.data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: raw.data.len(),
            });
        }
        Ok(Self {
            dim: raw.dim,
            data: raw.data,
        })
    }
}

impl DenseMatrix {
    /// Creates an `n×n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            dim: n,
            data: vec![0.0; n * n],
        }
    }

    /// Creates an `n×n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Creates a matrix from rows. Every row must have as many entries as
    /// there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { dim: n, data })
    }

    /// Creates a matrix from a square `ndarray` array.
    pub fn from_array(arr: &nd::Array2<f64>) -> Result<Self> {
        let (rows, cols) = arr.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                expected: rows,
                actual: cols,
            });
        }
        Ok(Self {
            dim: rows,
            data: arr.iter().copied().collect(),
        })
    }

    /// Copies the matrix into an `ndarray` array.
    pub fn to_array(&self) -> nd::Array2<f64> {
        nd::Array2::from_shape_fn((self.dim, self.dim), |(i, j)| self.get(i, j))
    }

    /// Number of rows (equal to the number of columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.dim + j] = value;
    }

    /// Row-major view of all entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Returns the diagonal entries.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dim).map(|i| self.get(i, i)).collect()
    }

    /// Returns true if `|M[i][j] - M[j][i]| <= tol` for all entries.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.dim).all(|i| {
            ((i + 1)..self.dim).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }

    /// Returns the lower triangle (with diagonal); the strict upper triangle
    /// is zero.
    pub fn lower_triangle(&self) -> Self {
        let mut out = Self::zeros(self.dim);
        for i in 0..self.dim {
            for j in 0..=i {
                out.set(i, j, self.get(i, j));
            }
        }
        out
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                out.set(j, i, self.get(i, j));
            }
        }
        out
    }

    /// Matrix product `self * other`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.dim != other.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        let n = self.dim;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out.data[i * n + j] += a * other.get(k, j);
                }
            }
        }
        Ok(out)
    }

    /// Largest absolute entry-wise difference, or `None` if dimensions differ.
    pub fn max_abs_diff(&self, other: &Self) -> Option<f64> {
        if self.dim != other.dim {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        for i in 0..self.dim {
            let row: Vec<String> = self
                .row(i)
                .iter()
                .map(|v| format!("{:>8.prec$}", v, prec = prec))
                .collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}
