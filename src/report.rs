//! Combined output of a merge job, as written by `merge_demo`.

use crate::config::merge_job::MergeJobConfig;
use crate::diagnostics::WarnSink;
use crate::lstsq::{l2_min, LstsqSolution, SolveReport};
use crate::points::{find_common_points, CommonPoints};
use crate::unwrap_diff::{bands_from_shape, pairwise_unwrapped_diff_with};
use nalgebra::DMatrix;
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
pub struct MergeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_points: Option<CommonPoints>,
    /// One row of 11 percentile values per band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_histogram: Option<Vec<Vec<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<LstsqSolution>,
}

impl MergeReport {
    /// Run every operation the job describes, stopping at the first failure.
    pub fn from_job(
        config: &MergeJobConfig,
        sink: Option<&dyn WarnSink>,
    ) -> Result<Self, String> {
        let mut report = MergeReport::default();

        if let Some(clouds) = &config.clouds {
            let common = find_common_points(&clouds.c1, &clouds.c2)
                .map_err(|e| format!("Common-point search failed: {e}"))?;
            report.common_points = Some(common);
        }

        if let Some(phases) = &config.phases {
            let b1 = bands_from_shape(&phases.shape, &phases.b1).map_err(|e| format!("b1: {e}"))?;
            let b2 = bands_from_shape(&phases.shape, &phases.b2).map_err(|e| format!("b2: {e}"))?;
            let hist = pairwise_unwrapped_diff_with(&b1, &b2, &config.unwrap_diff)
                .map_err(|e| format!("Unwrapped difference check failed: {e}"))?;
            report.set_histogram(&hist);
        }

        if let Some(system) = &config.system {
            let a = system.matrix.build()?;
            let b = system.rhs_vector();
            let solution = l2_min(&a, &b, sink)
                .map_err(|e| format!("Least-squares solve failed: {e}"))?;
            report.solution = Some(solution);
        }

        Ok(report)
    }

    pub fn set_histogram(&mut self, hist: &DMatrix<i32>) {
        let rows: Vec<Vec<i32>> = hist
            .row_iter()
            .map(|row| row.iter().copied().collect::<Vec<i32>>())
            .collect();
        self.cycle_histogram = Some(rows);
    }

    pub fn print_text_summary(&self) {
        println!("Merge summary");
        match &self.common_points {
            Some(common) => println!("  common points: {}", common.len()),
            None => println!("  common points: skipped"),
        }
        match &self.cycle_histogram {
            Some(rows) => {
                println!("  cycle histogram ({} bands):", rows.len());
                for (band, row) in rows.iter().enumerate() {
                    println!("    band {band}: {row:?}");
                }
            }
            None => println!("  cycle histogram: skipped"),
        }
        match &self.solution {
            Some(sol) => {
                println!(
                    "  least squares: |x|={:.6e} |r|={:.6e}",
                    sol.x.norm(),
                    sol.residual.norm()
                );
                match &sol.report {
                    SolveReport::Empty => println!("    empty system"),
                    SolveReport::Dense { rank } => println!("    dense SVD, rank={rank}"),
                    SolveReport::Sparse { method, nnz } => {
                        println!("    sparse {method:?}, nnz={nnz}")
                    }
                }
            }
            None => println!("  least squares: skipped"),
        }
    }
}
