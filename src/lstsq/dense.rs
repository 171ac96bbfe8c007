use crate::error::MergeError;
use nalgebra::{DMatrix, DVector};

/// Minimum-norm least-squares solve through a full SVD.
///
/// Singular values at or below `ε · max(rows, cols) · σ_max` are treated as
/// zero. Returns the solution and the numerical rank.
pub(crate) fn solve_svd(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<(DVector<f64>, usize), MergeError> {
    let (rows, cols) = a.shape();
    let svd = a
        .clone()
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or_else(|| MergeError::Numerical("SVD did not converge".to_string()))?;
    let sigma_max = svd.singular_values.iter().copied().fold(0.0f64, f64::max);
    let cutoff = f64::EPSILON * rows.max(cols) as f64 * sigma_max;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();
    let x = svd
        .solve(b, cutoff)
        .map_err(|msg| MergeError::Numerical(msg.to_string()))?;
    Ok((x, rank))
}
