//! Least-squares solves for dense and sparse coefficient matrices.
//!
//! [`l2_min`] finds `x` minimising `‖Ax - b‖₂`. Dense matrices go through a
//! minimum-norm SVD solve in nalgebra; CSR matrices through faer's sparse
//! QR (or LU of `A·Aᵀ` for wide systems). Either way the residual `b - Ax` is
//! recomputed from the returned `x`.

mod dense;
mod sparse;

pub use sparse::SparseMethod;

use crate::diagnostics::WarnSink;
use crate::error::MergeError;
use log::debug;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::ops::serial::spmm_csr_dense;
use nalgebra_sparse::ops::Op;
use nalgebra_sparse::CsrMatrix;
use serde::Serialize;

/// Coefficient matrix of a linear system in either storage layout.
#[derive(Clone, Debug)]
pub enum CoefficientMatrix {
    Dense(DMatrix<f64>),
    Sparse(CsrMatrix<f64>),
}

impl From<DMatrix<f64>> for CoefficientMatrix {
    fn from(m: DMatrix<f64>) -> Self {
        CoefficientMatrix::Dense(m)
    }
}

impl From<CsrMatrix<f64>> for CoefficientMatrix {
    fn from(m: CsrMatrix<f64>) -> Self {
        CoefficientMatrix::Sparse(m)
    }
}

impl CoefficientMatrix {
    pub fn nrows(&self) -> usize {
        match self {
            CoefficientMatrix::Dense(m) => m.nrows(),
            CoefficientMatrix::Sparse(m) => m.nrows(),
        }
    }

    pub fn ncols(&self) -> usize {
        match self {
            CoefficientMatrix::Dense(m) => m.ncols(),
            CoefficientMatrix::Sparse(m) => m.ncols(),
        }
    }

    /// True when the matrix has no elements at all (zero rows or zero columns).
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// `A·x`. `x` must have `ncols()` entries.
    pub fn mul_vector(&self, x: &DVector<f64>) -> DVector<f64> {
        match self {
            CoefficientMatrix::Dense(m) => m * x,
            CoefficientMatrix::Sparse(m) => m * x,
        }
    }

    /// `Aᵀ·y`. `y` must have `nrows()` entries.
    pub fn tr_mul_vector(&self, y: &DVector<f64>) -> DVector<f64> {
        match self {
            CoefficientMatrix::Dense(m) => m.tr_mul(y),
            CoefficientMatrix::Sparse(m) => {
                let mut out = DVector::zeros(m.ncols());
                spmm_csr_dense(0.0, &mut out, 1.0, Op::Transpose(m), Op::NoOp(y));
                out
            }
        }
    }

    fn find_non_finite(&self) -> Option<(usize, usize)> {
        match self {
            CoefficientMatrix::Dense(m) => m
                .iter()
                .position(|v| !v.is_finite())
                .map(|i| (i % m.nrows(), i / m.nrows())),
            CoefficientMatrix::Sparse(m) => m
                .triplet_iter()
                .find(|(_, _, v)| !v.is_finite())
                .map(|(r, c, _)| (r, c)),
        }
    }
}

/// How a solution was obtained.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolveReport {
    /// Empty coefficient matrix; nothing was solved.
    Empty,
    /// SVD solve with the given numerical rank.
    Dense { rank: usize },
    /// Sparse direct solve.
    Sparse { method: SparseMethod, nnz: usize },
}

#[derive(Clone, Debug, Serialize)]
pub struct LstsqSolution {
    /// Minimiser of `‖Ax - b‖₂`.
    pub x: DVector<f64>,
    /// `b - A·x`.
    pub residual: DVector<f64>,
    pub report: SolveReport,
}

/// Find `x` minimising `‖Ax - b‖₂`.
///
/// An empty `A` short-circuits to zero vectors (`x` of length `ncols`,
/// residual of length `nrows`) and reports a warning to `sink`; `b` is not
/// inspected in that case. Otherwise `b` must have `nrows` entries and every
/// entry of `A` and `b` must be finite.
pub fn l2_min(
    a: &CoefficientMatrix,
    b: &DVector<f64>,
    sink: Option<&dyn WarnSink>,
) -> Result<LstsqSolution, MergeError> {
    if a.is_empty() {
        if let Some(sink) = sink {
            sink.warn("A is empty; returning all zeros");
        }
        return Ok(LstsqSolution {
            x: DVector::zeros(a.ncols()),
            residual: DVector::zeros(a.nrows()),
            report: SolveReport::Empty,
        });
    }

    if a.nrows() != b.len() {
        return Err(MergeError::RowMismatch {
            rows: a.nrows(),
            rhs_len: b.len(),
        });
    }
    if let Some((row, col)) = a.find_non_finite() {
        return Err(MergeError::Numerical(format!(
            "non-finite coefficient at ({row}, {col})"
        )));
    }
    if let Some(row) = b.iter().position(|v| !v.is_finite()) {
        return Err(MergeError::Numerical(format!(
            "non-finite right-hand side at {row}"
        )));
    }

    let (x, report) = match a {
        CoefficientMatrix::Dense(m) => {
            let (x, rank) = dense::solve_svd(m, b)?;
            debug!(
                "l2_min: dense {}x{} rank={}",
                m.nrows(),
                m.ncols(),
                rank
            );
            (x, SolveReport::Dense { rank })
        }
        CoefficientMatrix::Sparse(m) => {
            let (x, method) = sparse::solve_sparse(m, b)?;
            debug!(
                "l2_min: sparse {}x{} nnz={} method={:?}",
                m.nrows(),
                m.ncols(),
                m.nnz(),
                method
            );
            (
                x,
                SolveReport::Sparse {
                    method,
                    nnz: m.nnz(),
                },
            )
        }
    };

    let residual = b - a.mul_vector(&x);
    Ok(LstsqSolution {
        x,
        residual,
        report,
    })
}
