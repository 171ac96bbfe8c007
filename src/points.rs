//! Overlap between two integer point clouds.
//!
//! Each `(x, y)` pair is folded into a scalar key `x * m + y` with
//! `m = 1 + max(y)` over both clouds, which turns the 2D match into a 1D
//! sorted-set intersection.

use crate::error::{CloudSide, MergeError};
use log::debug;
use serde::Serialize;

/// Index correspondences between two point clouds: `c1[ii[k]] == c2[jj[k]]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CommonPoints {
    pub ii: Vec<usize>,
    pub jj: Vec<usize>,
}

impl CommonPoints {
    pub fn len(&self) -> usize {
        self.ii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ii.is_empty()
    }

    /// Iterate matched `(index into c1, index into c2)` pairs in key order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ii.iter().copied().zip(self.jj.iter().copied())
    }
}

/// Find the coordinates shared by `c1` and `c2`.
///
/// Every shared coordinate appears once, represented by its first occurrence
/// in each cloud. Output is ordered by encoded key (x-major, then y), not by
/// input position. Empty clouds produce an empty result.
pub fn find_common_points(c1: &[[i64; 2]], c2: &[[i64; 2]]) -> Result<CommonPoints, MergeError> {
    check_non_negative(c1, CloudSide::First)?;
    check_non_negative(c2, CloudSide::Second)?;

    if c1.is_empty() || c2.is_empty() {
        debug!(
            "find_common_points: empty input (n={}, m={})",
            c1.len(),
            c2.len()
        );
        return Ok(CommonPoints::default());
    }

    // Non-negativity was checked, so the casts below are lossless and
    // x * (max_y + 1) + y stays below 2^127.
    let max_y = c1.iter().chain(c2.iter()).map(|p| p[1]).max().unwrap_or(0) as u128;
    let stride = max_y + 1;

    let keys1 = unique_keys(c1, stride);
    let keys2 = unique_keys(c2, stride);

    let mut out = CommonPoints {
        ii: Vec::with_capacity(keys1.len().min(keys2.len())),
        jj: Vec::with_capacity(keys1.len().min(keys2.len())),
    };
    let (mut a, mut b) = (0usize, 0usize);
    while a < keys1.len() && b < keys2.len() {
        let (ka, ia) = keys1[a];
        let (kb, ib) = keys2[b];
        match ka.cmp(&kb) {
            std::cmp::Ordering::Less => a += 1,
            std::cmp::Ordering::Greater => b += 1,
            std::cmp::Ordering::Equal => {
                out.ii.push(ia);
                out.jj.push(ib);
                a += 1;
                b += 1;
            }
        }
    }

    debug!(
        "find_common_points: n={} m={} unique=({}, {}) common={}",
        c1.len(),
        c2.len(),
        keys1.len(),
        keys2.len(),
        out.len()
    );
    Ok(out)
}

fn check_non_negative(cloud: &[[i64; 2]], side: CloudSide) -> Result<(), MergeError> {
    match cloud.iter().position(|p| p[0] < 0 || p[1] < 0) {
        Some(index) => Err(MergeError::NegativeCoordinate {
            cloud: side,
            index,
            point: cloud[index],
        }),
        None => Ok(()),
    }
}

/// Sorted `(key, first index)` pairs with duplicate keys removed.
fn unique_keys(cloud: &[[i64; 2]], stride: u128) -> Vec<(u128, usize)> {
    let mut keys: Vec<(u128, usize)> = cloud
        .iter()
        .enumerate()
        .map(|(i, p)| (p[0] as u128 * stride + p[1] as u128, i))
        .collect();
    keys.sort_unstable();
    keys.dedup_by_key(|entry| entry.0);
    keys
}
