//! Index artifact persistence
//!
//! The durable form of a build is a pair of files written together:
//!
//! - `index.pvec`: fixed header (magic, format version, dimensions, row
//!   count, all little-endian) followed by the row-major f32 matrix,
//! - `names.json`: the identifier table, order-aligned to matrix rows.
//!
//! A load either yields a fully consistent pair or fails; the row-count /
//! identifier-count check runs on every load. Writes go through `.tmp`
//! files renamed into place, so a previous artifact stays valid until the
//! new pair fully exists.

use crate::index::FlatIndex;
use pictura_domain::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 6] = b"PXVEC\0";
const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: usize = 6 + 2 + 4 + 8;

/// File names of the artifact pair inside the artifact directory.
pub const INDEX_FILE: &str = "index.pvec";
/// Identifier table file name.
pub const NAMES_FILE: &str = "names.json";

/// Reads and writes the persisted (index, identifier table) pair.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given artifact directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Artifact directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist the pair. Refuses to write a mismatched pair.
    pub async fn save(&self, index: &FlatIndex, names: &[String]) -> Result<()> {
        if names.len() != index.len() {
            return Err(Error::internal(format!(
                "refusing to save inconsistent artifact: {} rows but {} names",
                index.len(),
                names.len()
            )));
        }

        let dir = self.dir.clone();
        let matrix = encode_matrix(index);
        let names_json = serde_json::to_vec_pretty(names)?;

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            std::fs::create_dir_all(&dir)?;
            write_atomic(&dir.join(INDEX_FILE), &matrix)?;
            write_atomic(&dir.join(NAMES_FILE), &names_json)?;
            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("blocking task failed: {e}")))?
        .map_err(|e| Error::io_with_source("failed to write artifact pair", e))?;

        tracing::info!(
            rows = index.len(),
            dims = index.dims(),
            dir = %self.dir.display(),
            "artifact saved"
        );
        Ok(())
    }

    /// Load the pair, verifying internal consistency.
    pub async fn load(&self) -> Result<(FlatIndex, Vec<String>)> {
        let index_path = self.dir.join(INDEX_FILE);
        let names_path = self.dir.join(NAMES_FILE);

        let (matrix_bytes, names_bytes) =
            tokio::task::spawn_blocking(move || -> Result<(Vec<u8>, Vec<u8>)> {
                let matrix = read_required(&index_path)?;
                let names = read_required(&names_path)?;
                Ok((matrix, names))
            })
            .await
            .map_err(|e| Error::internal(format!("blocking task failed: {e}")))??;

        let index = decode_matrix(&matrix_bytes)?;
        let names: Vec<String> = serde_json::from_slice(&names_bytes)
            .map_err(|e| Error::artifact_corrupt(format!("identifier table unreadable: {e}")))?;

        // The central consistency invariant, checked on every load.
        if names.len() != index.len() {
            return Err(Error::artifact_corrupt(format!(
                "index holds {} rows but identifier table holds {} names",
                index.len(),
                names.len()
            )));
        }

        tracing::info!(
            rows = index.len(),
            dims = index.dims(),
            dir = %self.dir.display(),
            "artifact loaded"
        );
        Ok((index, names))
    }
}

fn read_required(path: &Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::artifact_missing(
            format!("{} not found", path.display()),
        )),
        Err(e) => Err(Error::io_with_source(
            format!("failed to read {}", path.display()),
            e,
        )),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp, path)
}

fn encode_matrix(index: &FlatIndex) -> Vec<u8> {
    let data = index.raw_data();
    let mut bytes = Vec::with_capacity(HEADER_LEN + data.len() * 4);
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(index.dims() as u32).to_le_bytes());
    bytes.extend_from_slice(&(index.len() as u64).to_le_bytes());
    for &value in data {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

fn decode_matrix(bytes: &[u8]) -> Result<FlatIndex> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::artifact_corrupt("matrix file shorter than header"));
    }
    if &bytes[0..6] != MAGIC {
        return Err(Error::artifact_corrupt("bad magic in matrix file"));
    }
    let version = u16::from_le_bytes([bytes[6], bytes[7]]);
    if version != FORMAT_VERSION {
        return Err(Error::artifact_corrupt(format!(
            "unsupported artifact version {version}"
        )));
    }
    let dims = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let count = u64::from_le_bytes(bytes[12..20].try_into().map_err(|_| {
        Error::artifact_corrupt("matrix header truncated")
    })?) as usize;

    if dims == 0 {
        return Err(Error::artifact_corrupt("matrix header declares 0 dimensions"));
    }

    let body = &bytes[HEADER_LEN..];
    let expected = count
        .checked_mul(dims)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| Error::artifact_corrupt("matrix header overflows"))?;
    if body.len() != expected {
        return Err(Error::artifact_corrupt(format!(
            "matrix body is {} bytes, header declares {} rows x {} dims ({} bytes)",
            body.len(),
            count,
            dims,
            expected
        )));
    }

    let mut data = Vec::with_capacity(count * dims);
    for chunk in body.chunks_exact(4) {
        data.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    FlatIndex::from_raw(dims, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictura_domain::value_objects::Embedding;

    #[test]
    fn encode_decode_preserves_exact_values() {
        let mut index = FlatIndex::new(3);
        index
            .add(&[
                Embedding::new(vec![0.1, -0.2, 0.97], "t"),
                Embedding::new(vec![1.0, 0.0, 0.0], "t"),
            ])
            .unwrap();

        let decoded = decode_matrix(&encode_matrix(&index)).unwrap();
        assert_eq!(decoded, index);
    }

    #[test]
    fn decode_rejects_truncated_body() {
        let mut index = FlatIndex::new(2);
        index
            .add(&[Embedding::new(vec![1.0, 0.0], "t")])
            .unwrap();
        let mut bytes = encode_matrix(&index);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            decode_matrix(&bytes),
            Err(Error::ArtifactCorrupt { .. })
        ));
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..6].copy_from_slice(b"NOTPXV");
        assert!(matches!(
            decode_matrix(&bytes),
            Err(Error::ArtifactCorrupt { .. })
        ));
    }
}
