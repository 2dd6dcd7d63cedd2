//! Disk round-trip and corruption behavior of the vector index.
//!
//! The contract under test: both artifacts load together or not at all;
//! a missing artifact means an empty index; artifacts that disagree are
//! fatal and never silently truncated or padded.

use sibyl_core::errors::IndexError;
use sibyl_index::persistence::map_path;
use sibyl_index::VectorIndex;
use tempfile::TempDir;

fn seed_vectors(n: usize, dim: usize) -> (Vec<i64>, Vec<Vec<f32>>) {
    let ids: Vec<i64> = (0..n as i64).collect();
    let vectors: Vec<Vec<f32>> = (0..n)
        .map(|i| (0..dim).map(|d| (i * dim + d) as f32 + 1.0).collect())
        .collect();
    (ids, vectors)
}

#[test]
fn open_creates_and_persists_empty_index() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.index");
    let index = VectorIndex::open(8, &path).unwrap();
    assert_eq!(index.count(), 0);
    assert!(path.exists(), "blob must be written on first open");
    assert!(map_path(&path).exists(), "sidecar must be written on first open");
}

#[test]
fn reopen_preserves_vectors_and_id_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.index");
    let (ids, vectors) = seed_vectors(4, 3);

    let query = [1.0, 0.5, 0.25];
    let before = {
        let mut index = VectorIndex::open(3, &path).unwrap();
        index.add(&ids, &vectors).unwrap();
        index.search(&query, 4).unwrap()
    };

    let reopened = VectorIndex::open(3, &path).unwrap();
    assert_eq!(reopened.count(), 4);
    assert_eq!(reopened.id_map(), ids.as_slice());

    let after = reopened.search(&query, 4).unwrap();
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.record_id, a.record_id);
        assert!((b.score - a.score).abs() < 1e-6);
    }
}

#[test]
fn missing_sidecar_is_absence_not_corruption() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lonely.index");
    let (ids, vectors) = seed_vectors(3, 2);
    {
        let mut index = VectorIndex::open(2, &path).unwrap();
        index.add(&ids, &vectors).unwrap();
    }
    std::fs::remove_file(map_path(&path)).unwrap();

    let index = VectorIndex::open(2, &path).unwrap();
    assert_eq!(index.count(), 0, "one missing artifact means empty index");
}

#[test]
fn missing_blob_is_absence_not_corruption() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mapless.index");
    let (ids, vectors) = seed_vectors(3, 2);
    {
        let mut index = VectorIndex::open(2, &path).unwrap();
        index.add(&ids, &vectors).unwrap();
    }
    std::fs::remove_file(&path).unwrap();

    let index = VectorIndex::open(2, &path).unwrap();
    assert_eq!(index.count(), 0);
}

#[test]
fn count_disagreement_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drifted.index");
    let (ids, vectors) = seed_vectors(10, 2);
    {
        let mut index = VectorIndex::open(2, &path).unwrap();
        index.add(&ids, &vectors).unwrap();
    }

    // Rewrite the sidecar with one id missing: blob says 10, map says 9.
    let nine: Vec<i64> = ids[..9].to_vec();
    std::fs::write(map_path(&path), serde_json::to_vec(&nine).unwrap()).unwrap();

    let err = VectorIndex::open(2, &path).unwrap_err();
    assert!(
        matches!(err, IndexError::CorruptPersistence { .. }),
        "expected CorruptPersistence, got {err:?}"
    );
}

#[test]
fn garbage_blob_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.index");
    {
        let _ = VectorIndex::open(2, &path).unwrap();
    }
    std::fs::write(&path, b"not a vector blob at all").unwrap();

    let err = VectorIndex::open(2, &path).unwrap_err();
    assert!(matches!(err, IndexError::CorruptPersistence { .. }));
}

#[test]
fn dim_disagreement_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("redim.index");
    {
        let mut index = VectorIndex::open(2, &path).unwrap();
        index.add(&[1], &[vec![1.0, 0.0]]).unwrap();
    }
    let err = VectorIndex::open(3, &path).unwrap_err();
    assert!(matches!(err, IndexError::CorruptPersistence { .. }));
}

#[test]
fn unparseable_sidecar_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("badmap.index");
    let (ids, vectors) = seed_vectors(2, 2);
    {
        let mut index = VectorIndex::open(2, &path).unwrap();
        index.add(&ids, &vectors).unwrap();
    }
    std::fs::write(map_path(&path), b"{ definitely not json").unwrap();

    let err = VectorIndex::open(2, &path).unwrap_err();
    assert!(matches!(err, IndexError::CorruptPersistence { .. }));
}

#[test]
fn empty_add_skips_persistence_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("noop.index");
    let mut index = VectorIndex::open(2, &path).unwrap();
    let before = std::fs::metadata(&path).unwrap().modified().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(20));
    index.add(&[], &[]).unwrap();

    let after = std::fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(before, after, "empty add must not rewrite the blob");
}
