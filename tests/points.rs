mod common;

use common::synthetic::{random_cloud, Lcg};
use phase_merge::{find_common_points, MergeError};
use std::collections::BTreeSet;

#[test]
fn concrete_overlap() {
    let c1 = [[0, 0], [1, 2], [3, 3]];
    let c2 = [[1, 2], [5, 5], [3, 3]];
    let common = find_common_points(&c1, &c2).expect("valid clouds");
    let matched: Vec<[i64; 2]> = common.ii.iter().map(|&i| c1[i]).collect();
    assert_eq!(matched, vec![[1, 2], [3, 3]]);
    assert_eq!(common.ii, vec![1, 2]);
    assert_eq!(common.jj, vec![0, 2]);
}

#[test]
fn random_clouds_match_set_intersection() {
    let mut rng = Lcg::new(7);
    for trial in 0..20 {
        let c1 = random_cloud(&mut rng, 200, 30, 25);
        let c2 = random_cloud(&mut rng, 150, 30, 25);
        let common = find_common_points(&c1, &c2).expect("non-negative clouds");

        for (i, j) in common.pairs() {
            assert_eq!(c1[i], c2[j], "trial {trial}: mismatched pair ({i}, {j})");
        }

        let s1: BTreeSet<[i64; 2]> = c1.iter().copied().collect();
        let s2: BTreeSet<[i64; 2]> = c2.iter().copied().collect();
        let expected: Vec<[i64; 2]> = s1.intersection(&s2).copied().collect();
        let found: Vec<[i64; 2]> = common.ii.iter().map(|&i| c1[i]).collect();
        // BTreeSet order on [x, y] is the same x-major order as the encoded key.
        assert_eq!(found, expected, "trial {trial}");

        for (i, j) in common.pairs() {
            assert_eq!(c1.iter().position(|p| *p == c1[i]), Some(i));
            assert_eq!(c2.iter().position(|p| *p == c2[j]), Some(j));
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let mut rng = Lcg::new(99);
    let c1 = random_cloud(&mut rng, 64, 10, 10);
    let c2 = random_cloud(&mut rng, 64, 10, 10);
    let first = find_common_points(&c1, &c2).unwrap();
    let second = find_common_points(&c1, &c2).unwrap();
    assert_eq!(first, second);
}

#[test]
fn negative_input_fails() {
    let c1 = [[0, -3]];
    let c2 = [[0, 0]];
    assert!(matches!(
        find_common_points(&c1, &c2),
        Err(MergeError::NegativeCoordinate { index: 0, .. })
    ));
}
