use nalgebra::{DMatrix, DVector};
use phase_merge::{find_common_points, l2_min, pairwise_unwrapped_diff, CoefficientMatrix};
use std::f64::consts::TAU;

fn main() {
    // Demo stub: runs each helper on a tiny synthetic input.
    let c1 = [[0, 0], [1, 2], [3, 3]];
    let c2 = [[1, 2], [5, 5], [3, 3]];
    match find_common_points(&c1, &c2) {
        Ok(common) => println!("common: ii={:?} jj={:?}", common.ii, common.jj),
        Err(err) => eprintln!("common points failed: {err}"),
    }

    let b1 = DMatrix::from_fn(2, 11, |r, c| 0.1 * (r + c) as f64);
    let b2 = b1.map(|v| v + 3.0 * TAU);
    match pairwise_unwrapped_diff(&b1, &b2) {
        Ok(hist) => println!("histogram row 0: {:?}", hist.row(0).iter().collect::<Vec<_>>()),
        Err(err) => eprintln!("histogram failed: {err}"),
    }

    let a = CoefficientMatrix::from(DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]));
    let b = DVector::from_vec(vec![1.0, 2.0, 3.0]);
    match l2_min(&a, &b, None) {
        Ok(sol) => println!("x={:?} |r|={:.3e}", sol.x.as_slice(), sol.residual.norm()),
        Err(err) => eprintln!("least squares failed: {err}"),
    }
}
