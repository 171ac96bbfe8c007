use crate::error::MergeError;
use faer::linalg::solvers::{SolveCore, SolveLstsqCore};
use faer::sparse::{SparseColMat, Triplet};
use faer::{Conj, Mat};
use nalgebra::DVector;
use nalgebra_sparse::ops::serial::spmm_csr_dense;
use nalgebra_sparse::ops::Op;
use nalgebra_sparse::CsrMatrix;
use serde::Serialize;

/// Factorisation used for a sparse solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SparseMethod {
    /// Sparse QR of `A`; used when `rows >= cols`.
    Qr,
    /// Sparse LU of `A·Aᵀ`, then `x = Aᵀ·y`; the minimum-norm solution of a
    /// wide system with full row rank.
    NormalLu,
}

/// Least-squares solve of a non-empty CSR system through faer's sparse
/// factorisations.
///
/// Fails with [`MergeError::Numerical`] when the factorisation fails or the
/// matrix is too rank deficient to give a finite solution.
pub(crate) fn solve_sparse(
    a: &CsrMatrix<f64>,
    b: &DVector<f64>,
) -> Result<(DVector<f64>, SparseMethod), MergeError> {
    let (rows, cols) = (a.nrows(), a.ncols());
    let mut rhs = Mat::<f64>::from_fn(rows, 1, |i, _| b[i]);

    let (x, method) = if rows >= cols {
        let qr = to_faer(a)?
            .as_ref()
            .sp_qr()
            .map_err(|e| MergeError::Numerical(format!("sparse QR failed: {e:?}")))?;
        qr.solve_lstsq_in_place_with_conj(Conj::No, rhs.as_mut());
        (DVector::from_fn(cols, |i, _| rhs[(i, 0)]), SparseMethod::Qr)
    } else {
        let gram = a * &a.transpose();
        let lu = to_faer(&gram)?
            .as_ref()
            .sp_lu()
            .map_err(|e| MergeError::Numerical(format!("sparse LU failed: {e:?}")))?;
        lu.solve_in_place_with_conj(Conj::No, rhs.as_mut());
        let y = DVector::from_fn(rows, |i, _| rhs[(i, 0)]);
        let mut x = DVector::zeros(cols);
        spmm_csr_dense(0.0, &mut x, 1.0, Op::Transpose(a), Op::NoOp(&y));
        (x, SparseMethod::NormalLu)
    };

    if x.iter().any(|v| !v.is_finite()) {
        return Err(MergeError::Numerical(format!(
            "sparse {rows}x{cols} system is rank deficient"
        )));
    }
    Ok((x, method))
}

fn to_faer(m: &CsrMatrix<f64>) -> Result<SparseColMat<usize, f64>, MergeError> {
    let triplets: Vec<Triplet<usize, usize, f64>> = m
        .triplet_iter()
        .map(|(r, c, &v)| Triplet::new(r, c, v))
        .collect();
    SparseColMat::try_new_from_triplets(m.nrows(), m.ncols(), &triplets)
        .map_err(|e| MergeError::Numerical(format!("sparse assembly failed: {e:?}")))
}
