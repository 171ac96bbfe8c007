#![allow(dead_code)]

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Small deterministic generator so fixtures are reproducible across runs.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    /// Uniform integer in `[0, bound)`.
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        self.next_u64() % bound
    }

    /// Uniform float in `[-1, 1)`.
    pub fn signed_unit(&mut self) -> f64 {
        (self.next_u64() as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}

/// Random cloud of `n` points on a `width x height` grid (duplicates allowed).
pub fn random_cloud(rng: &mut Lcg, n: usize, width: u64, height: u64) -> Vec<[i64; 2]> {
    (0..n)
        .map(|_| [rng.below(width) as i64, rng.below(height) as i64])
        .collect()
}

/// Random dense matrix with a boosted diagonal so it is well conditioned.
pub fn well_conditioned(rng: &mut Lcg, rows: usize, cols: usize) -> DMatrix<f64> {
    let mut m = DMatrix::from_fn(rows, cols, |_, _| rng.signed_unit());
    for i in 0..rows.min(cols) {
        m[(i, i)] += 4.0;
    }
    m
}

pub fn random_vector(rng: &mut Lcg, len: usize) -> DVector<f64> {
    DVector::from_fn(len, |_, _| rng.signed_unit())
}

/// CSR copy of the non-zero entries of `m`.
pub fn to_csr(m: &DMatrix<f64>) -> CsrMatrix<f64> {
    let mut coo = CooMatrix::new(m.nrows(), m.ncols());
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            let v = m[(r, c)];
            if v != 0.0 {
                coo.push(r, c, v);
            }
        }
    }
    CsrMatrix::from(&coo)
}

/// Zero out all but roughly `keep` of every `out_of` entries.
pub fn sparsify(rng: &mut Lcg, m: &mut DMatrix<f64>, keep: u64, out_of: u64) {
    let diag = m.nrows().min(m.ncols());
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            if r == c && r < diag {
                continue;
            }
            if rng.below(out_of) >= keep {
                m[(r, c)] = 0.0;
            }
        }
    }
}
