#![doc = include_str!("../README.md")]

// Core helpers
pub mod lstsq;
pub mod points;
pub mod unwrap_diff;

// Shared types and plumbing
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod io;
pub mod report;

// --- High-level re-exports -------------------------------------------------

pub use crate::diagnostics::{LogSink, WarnSink};
pub use crate::error::MergeError;
pub use crate::lstsq::{l2_min, CoefficientMatrix, LstsqSolution, SolveReport, SparseMethod};
pub use crate::points::{find_common_points, CommonPoints};
pub use crate::unwrap_diff::{pairwise_unwrapped_diff, pairwise_unwrapped_diff_with, UnwrapDiffParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use phase_merge::prelude::*;
///
/// let common = find_common_points(&[[0, 0], [2, 1]], &[[2, 1]]).unwrap();
/// assert_eq!(common.ii, vec![1]);
/// assert_eq!(common.jj, vec![0]);
/// ```
pub mod prelude {
    pub use crate::lstsq::{l2_min, CoefficientMatrix};
    pub use crate::points::find_common_points;
    pub use crate::unwrap_diff::pairwise_unwrapped_diff;
    pub use crate::{LogSink, MergeError, WarnSink};
}
