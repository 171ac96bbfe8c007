//! Job description for the `merge_demo` tool.
//!
//! A job names any subset of the three operations. Sections that are absent
//! are skipped.
//!
//! ```json
//! {
//!   "clouds": { "c1": [[0, 0], [1, 2]], "c2": [[1, 2]] },
//!   "phases": { "shape": [1, 11], "b1": [...], "b2": [...] },
//!   "system": {
//!     "matrix": { "storage": "sparse", "rows": 3, "cols": 2,
//!                 "triplets": [[0, 0, 1.0], [1, 1, 1.0], [2, 0, 1.0]] },
//!     "rhs": [1.0, 2.0, 1.0]
//!   },
//!   "output": { "dir": "out", "report_json": "report.json" }
//! }
//! ```

use crate::io::read_json_file;
use crate::lstsq::CoefficientMatrix;
use crate::unwrap_diff::UnwrapDiffParams;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct MergeJobConfig {
    #[serde(default)]
    pub clouds: Option<CloudsConfig>,
    #[serde(default)]
    pub phases: Option<PhasesConfig>,
    #[serde(default)]
    pub system: Option<SystemConfig>,
    #[serde(default)]
    pub unwrap_diff: UnwrapDiffParams,
    pub output: JobOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CloudsConfig {
    pub c1: Vec<[i64; 2]>,
    pub c2: Vec<[i64; 2]>,
}

/// Two phase stacks given as row-major buffers sharing one shape.
#[derive(Debug, Deserialize)]
pub struct PhasesConfig {
    pub shape: Vec<usize>,
    pub b1: Vec<f64>,
    pub b2: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SystemConfig {
    pub matrix: MatrixConfig,
    pub rhs: Vec<f64>,
}

impl SystemConfig {
    pub fn rhs_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.rhs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "storage", rename_all = "snake_case")]
pub enum MatrixConfig {
    /// Row-major values.
    Dense {
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    },
    /// `(row, col, value)` entries; duplicates are summed.
    Sparse {
        rows: usize,
        cols: usize,
        triplets: Vec<(usize, usize, f64)>,
    },
}

impl MatrixConfig {
    pub fn build(&self) -> Result<CoefficientMatrix, String> {
        match self {
            MatrixConfig::Dense { rows, cols, values } => {
                if rows.checked_mul(*cols) != Some(values.len()) {
                    return Err(format!(
                        "Dense matrix {rows}x{cols} needs {} values, got {}",
                        rows.saturating_mul(*cols),
                        values.len()
                    ));
                }
                Ok(DMatrix::from_row_slice(*rows, *cols, values).into())
            }
            MatrixConfig::Sparse {
                rows,
                cols,
                triplets,
            } => {
                let mut coo = CooMatrix::new(*rows, *cols);
                for &(r, c, v) in triplets {
                    if r >= *rows || c >= *cols {
                        return Err(format!(
                            "Sparse entry ({r}, {c}) outside {rows}x{cols} matrix"
                        ));
                    }
                    coo.push(r, c, v);
                }
                Ok(CsrMatrix::from(&coo).into())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JobOutputConfig {
    pub dir: PathBuf,
    #[serde(default = "default_report_json")]
    pub report_json: PathBuf,
}

fn default_report_json() -> PathBuf {
    PathBuf::from("merge_report.json")
}

impl JobOutputConfig {
    /// `report_json`, taken relative to `dir` unless it is absolute.
    pub fn report_path(&self) -> PathBuf {
        if self.report_json.is_absolute() {
            self.report_json.clone()
        } else {
            self.dir.join(&self.report_json)
        }
    }
}

/// Load a job file; errors name the file.
pub fn load_config(path: &Path) -> Result<MergeJobConfig, String> {
    read_json_file(path)
}

pub fn parse_config(json: &str) -> Result<MergeJobConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_job_uses_defaults() {
        let cfg = parse_config(r#"{ "output": { "dir": "out" } }"#).unwrap();
        assert!(cfg.clouds.is_none() && cfg.phases.is_none() && cfg.system.is_none());
        assert_eq!(cfg.unwrap_diff.tolerance_cycles, 0.01);
        assert_eq!(
            cfg.output.report_path(),
            Path::new("out").join("merge_report.json")
        );
    }

    #[test]
    fn partial_parameter_overrides_keep_other_defaults() {
        let cfg = parse_config(
            r#"{
                "unwrap_diff": { "tolerance_cycles": 0.05 },
                "output": { "dir": "out", "report_json": "/tmp/r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.unwrap_diff.tolerance_cycles, 0.05);
        assert_eq!(cfg.output.report_path(), PathBuf::from("/tmp/r.json"));
    }

    #[test]
    fn matrices_build_in_both_layouts() {
        let cfg = parse_config(
            r#"{
                "system": {
                    "matrix": { "storage": "sparse", "rows": 2, "cols": 3,
                                "triplets": [[0, 2, 1.5], [1, 0, -1.0]] },
                    "rhs": [1.0, 2.0]
                },
                "output": { "dir": "." }
            }"#,
        )
        .unwrap();
        let system = cfg.system.unwrap();
        let a = system.matrix.build().unwrap();
        assert!(matches!(a, CoefficientMatrix::Sparse(_)));
        assert_eq!((a.nrows(), a.ncols()), (2, 3));
        assert_eq!(system.rhs_vector().len(), 2);

        let dense = MatrixConfig::Dense {
            rows: 2,
            cols: 2,
            values: vec![1.0, 2.0, 3.0, 4.0],
        };
        match dense.build().unwrap() {
            CoefficientMatrix::Dense(m) => assert_eq!(m[(0, 1)], 2.0),
            other => panic!("expected dense matrix, got {other:?}"),
        }
    }

    #[test]
    fn malformed_matrices_are_rejected() {
        let short = MatrixConfig::Dense {
            rows: 2,
            cols: 2,
            values: vec![1.0],
        };
        assert!(short.build().is_err());
        let outside = MatrixConfig::Sparse {
            rows: 2,
            cols: 2,
            triplets: vec![(2, 0, 1.0)],
        };
        assert!(outside.build().is_err());
    }
}
