//! On-disk representation of the index: a binary vector blob plus a JSON
//! id-map sidecar at `<path>.map.json`.
//!
//! The two artifacts are always written together. At load time, one artifact
//! without the other is treated as absence (empty index); both present but
//! disagreeing in count is corruption and fatal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sibyl_core::errors::IndexError;
use sibyl_core::models::RecordId;
use tracing::debug;

/// Blob header magic.
const MAGIC: [u8; 4] = *b"SIBX";
/// Blob format version.
const VERSION: u32 = 1;
/// Header: magic + version + dim (u32) + count (u64).
const HEADER_LEN: usize = 4 + 4 + 4 + 8;

/// Path of the id-map sidecar for a given blob path.
pub fn map_path(index_path: &Path) -> PathBuf {
    let mut name = index_path.as_os_str().to_os_string();
    name.push(".map.json");
    PathBuf::from(name)
}

/// What a load attempt found on disk.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Both artifacts present and consistent.
    Loaded {
        dim: usize,
        storage: Vec<f32>,
        id_map: Vec<RecordId>,
    },
    /// At least one artifact missing; caller starts empty.
    Absent,
}

/// Load the blob + sidecar pair from disk.
///
/// Returns `IndexError::CorruptPersistence` when both artifacts exist but
/// cannot be parsed or disagree in vector count. Never truncates or pads.
pub fn load(index_path: &Path) -> Result<LoadOutcome, IndexError> {
    let sidecar = map_path(index_path);
    if !index_path.exists() || !sidecar.exists() {
        return Ok(LoadOutcome::Absent);
    }

    let blob = fs::read(index_path)?;
    let (dim, count, storage) = parse_blob(&blob)?;

    let map_bytes = fs::read(&sidecar)?;
    let id_map: Vec<RecordId> =
        serde_json::from_slice(&map_bytes).map_err(|e| IndexError::CorruptPersistence {
            details: format!("id-map sidecar is not valid JSON: {e}"),
        })?;

    if id_map.len() != count {
        return Err(IndexError::CorruptPersistence {
            details: format!(
                "vector blob holds {count} vectors but id-map lists {} ids",
                id_map.len()
            ),
        });
    }

    debug!(count, dim, path = %index_path.display(), "index loaded from disk");
    Ok(LoadOutcome::Loaded {
        dim,
        storage,
        id_map,
    })
}

/// Write both artifacts. Each is written to a temp file and renamed into
/// place so a crash mid-write leaves the previous pair readable.
pub fn persist(
    index_path: &Path,
    dim: usize,
    storage: &[f32],
    id_map: &[RecordId],
) -> Result<(), IndexError> {
    let count = id_map.len();
    debug_assert_eq!(storage.len(), count * dim);

    let mut blob = Vec::with_capacity(HEADER_LEN + storage.len() * 4);
    blob.extend_from_slice(&MAGIC);
    blob.extend_from_slice(&VERSION.to_le_bytes());
    blob.extend_from_slice(&(dim as u32).to_le_bytes());
    blob.extend_from_slice(&(count as u64).to_le_bytes());
    for v in storage {
        blob.extend_from_slice(&v.to_le_bytes());
    }
    write_atomic(index_path, &blob)?;

    let map_json = serde_json::to_vec(id_map).map_err(|e| IndexError::Persistence {
        message: format!("id-map serialization: {e}"),
    })?;
    write_atomic(&map_path(index_path), &map_json)?;

    debug!(count, dim, path = %index_path.display(), "index persisted");
    Ok(())
}

fn parse_blob(bytes: &[u8]) -> Result<(usize, usize, Vec<f32>), IndexError> {
    if bytes.len() < HEADER_LEN {
        return Err(IndexError::CorruptPersistence {
            details: format!("blob shorter than header ({} bytes)", bytes.len()),
        });
    }
    if bytes[0..4] != MAGIC {
        return Err(IndexError::CorruptPersistence {
            details: "blob magic mismatch".to_string(),
        });
    }
    let version = u32::from_le_bytes(bytes[4..8].try_into().unwrap_or_default());
    if version != VERSION {
        return Err(IndexError::CorruptPersistence {
            details: format!("unsupported blob version {version}"),
        });
    }
    let dim = u32::from_le_bytes(bytes[8..12].try_into().unwrap_or_default()) as usize;
    let count = u64::from_le_bytes(bytes[12..20].try_into().unwrap_or_default()) as usize;

    let payload = &bytes[HEADER_LEN..];
    let expected = count
        .checked_mul(dim)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| IndexError::CorruptPersistence {
            details: "blob header count/dim overflow".to_string(),
        })?;
    if payload.len() != expected {
        return Err(IndexError::CorruptPersistence {
            details: format!(
                "blob payload is {} bytes, header implies {expected}",
                payload.len()
            ),
        });
    }

    let storage = payload
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok((dim, count, storage))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), IndexError> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
