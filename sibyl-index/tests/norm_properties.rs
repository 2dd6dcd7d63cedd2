//! Property tests for the normalization invariant.

use proptest::prelude::*;
use sibyl_index::index::l2_normalize;
use sibyl_index::VectorIndex;
use tempfile::TempDir;

proptest! {
    /// Every finite vector normalizes to unit length, except the zero
    /// vector, which passes through unchanged.
    #[test]
    fn normalize_yields_unit_or_zero(v in proptest::collection::vec(-1000.0f32..1000.0, 1..64)) {
        let mut out = v.clone();
        l2_normalize(&mut out);
        let in_norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        let out_norm: f32 = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if in_norm == 0.0 {
            prop_assert_eq!(out, v);
        } else {
            prop_assert!((out_norm - 1.0).abs() < 1e-3, "norm {}", out_norm);
        }
    }

    /// Cosine scores of normalized vectors never exceed 1 (within tolerance),
    /// so search scores are bounded.
    #[test]
    fn search_scores_are_bounded(
        rows in proptest::collection::vec(
            proptest::collection::vec(-100.0f32..100.0, 4),
            1..16,
        ),
        query in proptest::collection::vec(-100.0f32..100.0, 4),
    ) {
        let dir = TempDir::new().unwrap();
        let mut index = VectorIndex::open(4, dir.path().join("prop.index")).unwrap();
        let ids: Vec<i64> = (0..rows.len() as i64).collect();
        index.add(&ids, &rows).unwrap();

        let hits = index.search(&query, rows.len()).unwrap();
        for hit in hits {
            prop_assert!(hit.score <= 1.0 + 1e-4, "score {}", hit.score);
            prop_assert!(hit.score >= -1.0 - 1e-4, "score {}", hit.score);
        }
    }
}
