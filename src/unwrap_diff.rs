//! Percentile statistics of whole-cycle offsets between two unwrapped
//! interferogram stacks.
//!
//! Two independently unwrapped versions of the same band should differ by an
//! integer number of 2π cycles per pixel. [`pairwise_unwrapped_diff`] checks
//! that and summarises each band's cycle offsets as an 11-bin percentile
//! histogram (0th, 10th, ..., 100th).

use crate::error::MergeError;
use log::debug;
use nalgebra::DMatrix;
use serde::Deserialize;
use std::f64::consts::TAU;

/// Number of percentile bins per band (0..=100 in steps of 10).
pub const PERCENTILE_BINS: usize = 11;

/// Minimum number of samples per band.
pub const MIN_SAMPLES: usize = PERCENTILE_BINS;

/// Parameters for the cycle-difference histogram.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct UnwrapDiffParams {
    /// Largest accepted distance (in cycles) between a phase difference and
    /// its nearest whole cycle.
    pub tolerance_cycles: f64,
}

impl Default for UnwrapDiffParams {
    fn default() -> Self {
        Self {
            tolerance_cycles: 0.01,
        }
    }
}

/// Build a `(bands, samples)` matrix from a row-major buffer and its shape.
///
/// Fails unless `shape` has exactly two axes whose product equals
/// `data.len()`.
pub fn bands_from_shape(shape: &[usize], data: &[f64]) -> Result<DMatrix<f64>, MergeError> {
    let &[bands, samples] = shape else {
        return Err(MergeError::NotTwoDimensional {
            shape: shape.to_vec(),
        });
    };
    if bands.checked_mul(samples) != Some(data.len()) {
        return Err(MergeError::ShapeDataMismatch {
            shape: shape.to_vec(),
            len: data.len(),
        });
    }
    Ok(DMatrix::from_row_slice(bands, samples, data))
}

/// Per-band percentile histogram of integer cycle offsets `b2 - b1`, using
/// default parameters.
pub fn pairwise_unwrapped_diff(
    b1: &DMatrix<f64>,
    b2: &DMatrix<f64>,
) -> Result<DMatrix<i32>, MergeError> {
    pairwise_unwrapped_diff_with(b1, b2, &UnwrapDiffParams::default())
}

/// Per-band percentile histogram of integer cycle offsets `b2 - b1`.
///
/// Returns a `(bands, 11)` matrix whose row `k` holds the 0th, 10th, ...,
/// 100th percentile of band `k`'s sorted cycle offsets.
pub fn pairwise_unwrapped_diff_with(
    b1: &DMatrix<f64>,
    b2: &DMatrix<f64>,
    params: &UnwrapDiffParams,
) -> Result<DMatrix<i32>, MergeError> {
    if b1.shape() != b2.shape() {
        return Err(MergeError::ShapeMismatch {
            left: b1.shape(),
            right: b2.shape(),
        });
    }
    let (bands, samples) = b1.shape();
    if samples < MIN_SAMPLES {
        return Err(MergeError::InsufficientSamples {
            samples,
            minimum: MIN_SAMPLES,
        });
    }

    let ranks = percentile_ranks(samples);
    let mut hist = DMatrix::<i32>::zeros(bands, PERCENTILE_BINS);
    let mut cycles = Vec::with_capacity(samples);

    for band in 0..bands {
        cycles.clear();
        for sample in 0..samples {
            let diff = (b2[(band, sample)] - b1[(band, sample)]) / TAU;
            cycles.push(nearest_cycle(diff, band, sample, params.tolerance_cycles)?);
        }
        cycles.sort_unstable();
        for (bin, &rank) in ranks.iter().enumerate() {
            hist[(band, bin)] = cycles[rank];
        }
    }

    debug!(
        "pairwise_unwrapped_diff: bands={} samples={} ranks={:?}",
        bands, samples, ranks
    );
    Ok(hist)
}

/// Sorted-order positions of the 0th..100th percentiles for `samples` values:
/// `floor(p/100 · samples)`, clamped to the last index.
fn percentile_ranks(samples: usize) -> [usize; PERCENTILE_BINS] {
    let last = samples.saturating_sub(1);
    let steps = PERCENTILE_BINS - 1;
    std::array::from_fn(|k| (k * samples / steps).min(last))
}

fn nearest_cycle(diff: f64, band: usize, sample: usize, tol: f64) -> Result<i32, MergeError> {
    let rounded = diff.round();
    let off = (diff - rounded).abs();
    if off.is_nan() || off > tol {
        return Err(MergeError::NonIntegerCycles {
            band,
            sample,
            cycles: diff,
        });
    }
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(MergeError::CycleOverflow {
            band,
            sample,
            cycles: diff,
        });
    }
    Ok(rounded as i32)
}
