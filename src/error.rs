//! Error type shared by the merge helpers.

/// Which input cloud an offending coordinate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloudSide {
    First,
    Second,
}

impl std::fmt::Display for CloudSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudSide::First => write!(f, "c1"),
            CloudSide::Second => write!(f, "c2"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MergeError {
    /// A point-cloud coordinate has a negative component.
    NegativeCoordinate {
        cloud: CloudSide,
        index: usize,
        point: [i64; 2],
    },
    /// The two phase arrays do not share a shape.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A flat phase buffer was described with a shape that is not 2-D.
    NotTwoDimensional { shape: Vec<usize> },
    /// A flat phase buffer does not hold `prod(shape)` elements.
    ShapeDataMismatch { shape: Vec<usize>, len: usize },
    /// Too few samples per band to address every percentile rank.
    InsufficientSamples { samples: usize, minimum: usize },
    /// Two phase values are not separated by a whole number of cycles.
    NonIntegerCycles {
        band: usize,
        sample: usize,
        cycles: f64,
    },
    /// A rounded cycle count does not fit the output integer type.
    CycleOverflow {
        band: usize,
        sample: usize,
        cycles: f64,
    },
    /// Coefficient matrix row count differs from the right-hand side length.
    RowMismatch { rows: usize, rhs_len: usize },
    /// Non-finite input, or the underlying factorisation failed.
    Numerical(String),
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::NegativeCoordinate {
                cloud,
                index,
                point,
            } => write!(
                f,
                "negative coordinate in {cloud}[{index}] = ({}, {})",
                point[0], point[1]
            ),
            MergeError::ShapeMismatch { left, right } => {
                write!(f, "shape mismatch: {left:?} vs {right:?}")
            }
            MergeError::NotTwoDimensional { shape } => {
                write!(f, "expecting 2D array as input - received {shape:?}")
            }
            MergeError::ShapeDataMismatch { shape, len } => {
                write!(f, "shape {shape:?} does not describe {len} elements")
            }
            MergeError::InsufficientSamples { samples, minimum } => write!(
                f,
                "need at least {minimum} elements per band - received {samples}"
            ),
            MergeError::NonIntegerCycles {
                band,
                sample,
                cycles,
            } => write!(
                f,
                "arrays differ by non-integer cycles at band {band}, sample {sample} ({cycles:.4} cycles)"
            ),
            MergeError::CycleOverflow {
                band,
                sample,
                cycles,
            } => write!(
                f,
                "cycle difference out of range at band {band}, sample {sample} ({cycles:e} cycles)"
            ),
            MergeError::RowMismatch { rows, rhs_len } => write!(
                f,
                "coefficient matrix has {rows} rows but right-hand side has {rhs_len} entries"
            ),
            MergeError::Numerical(msg) => write!(f, "numerical failure: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {}
