//! Proof attachments: raw bytes stored next to the record store.
//!
//! The blob store is a pure sink. Any byte stream is accepted as-is; no
//! size or content-type validation. The profile record only carries the
//! returned path, never ownership of the blob.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::BlobError;

/// Filesystem sink for proof attachments.
///
/// The target path is derived from the user id and the suggested
/// filename, so a repeated save for the same user and name overwrites
/// in place instead of accumulating copies.
pub struct ProofStore {
    root: PathBuf,
}

impl ProofStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Write `data` and return the path it landed at.
    pub fn save(&self, user_id: u64, data: &[u8], suggested_name: &str) -> Result<String, BlobError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| BlobError::Io(format!("Failed to create proof directory: {}", e)))?;

        let filename = format!("{}_{}", user_id, sanitize(suggested_name));
        let path = self.root.join(filename);
        fs::write(&path, data)
            .map_err(|e| BlobError::Io(format!("Failed to write proof file: {}", e)))?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Whether a previously recorded proof path still resolves to a file.
    /// Records are never re-validated at read time; callers check this
    /// right before rendering.
    pub fn exists(path: &str) -> bool {
        Path::new(path).is_file()
    }
}

/// Keep the stored name to a single path component.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "proof".to_string()
    } else {
        cleaned
    }
}

/// Downloads proof bytes from a remote source.
///
/// Every request runs under a hard timeout so a slow or unreachable
/// source cannot hang the surrounding profile operation. Fetches never
/// run while a store lock is held.
pub struct ProofFetcher {
    client: reqwest::Client,
}

impl ProofFetcher {
    pub fn new(timeout: Duration) -> Result<Self, BlobError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BlobError::Transfer(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, BlobError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BlobError::Transfer(format!("Failed to download proof: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlobError::UpstreamStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BlobError::Transfer(format!("Failed to read proof body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

/// Where the proof bytes come from.
#[derive(Debug)]
pub enum ProofSource {
    /// Bytes already in hand.
    Bytes(Vec<u8>),
    /// Remote URL, downloaded under the configured timeout.
    Url(String),
}

/// A proof attachment submitted alongside a profile write.
#[derive(Debug)]
pub struct ProofUpload {
    pub filename: String,
    pub source: ProofSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_returns_deterministic_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProofStore::new(temp_dir.path());

        let first = store.save(42, b"one", "proof.png").unwrap();
        let second = store.save(42, b"two", "proof.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"two");
    }

    #[test]
    fn test_save_creates_root_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProofStore::new(temp_dir.path().join("proofs"));
        let path = store.save(1, b"data", "shot.jpg").unwrap();
        assert!(ProofStore::exists(&path));
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize("screen shot.png"), "screen_shot.png");
        assert_eq!(sanitize(""), "proof");
    }

    #[test]
    fn test_saved_name_stays_inside_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProofStore::new(temp_dir.path());
        let path = store.save(9, b"x", "../escape.png").unwrap();
        assert!(Path::new(&path).starts_with(temp_dir.path()));
    }

    #[tokio::test]
    async fn test_fetch_rejects_unparsable_url() {
        let fetcher = ProofFetcher::new(Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, BlobError::Transfer(_)));
    }
}
