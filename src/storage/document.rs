//! Durable backend: one JSON document, replaced wholesale on every write.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

use super::GearStore;
use crate::core::{GearProfile, StoreError, StoreResult};

/// Gear records mirrored between memory and a single JSON document.
///
/// The whole map lives in memory as the fast path. Every mutation first
/// replaces the document on disk atomically (temp file + fsync + rename)
/// and only then updates the in-memory copy, so a failed write leaves
/// the last committed state intact on both sides.
///
/// On-disk layout: one JSON object mapping user-id-as-string to a
/// profile object. Stable across restarts.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    records: RwLock<HashMap<u64, GearProfile>>,
}

impl DocumentStore {
    /// Open (or create) the store backed by the document at `path`.
    ///
    /// Idempotent: re-opening an existing store re-reads the same
    /// document. A missing document is an empty store; an unreadable or
    /// unparsable one is reported as a storage failure, not silently
    /// reset.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("Failed to create store directory: {}", e)))?;
        }

        let records = if path.exists() {
            Self::load(&path)?
        } else {
            HashMap::new()
        };
        info!(
            "opened gear store at {} ({} records)",
            path.display(),
            records.len()
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    fn load(path: &Path) -> StoreResult<HashMap<u64, GearProfile>> {
        let data = fs::read(path)
            .map_err(|e| StoreError::Io(format!("Failed to read store document: {}", e)))?;
        let keyed: HashMap<String, GearProfile> = serde_json::from_slice(&data)
            .map_err(|e| StoreError::Corrupt(format!("Failed to parse store document: {}", e)))?;

        let mut records = HashMap::with_capacity(keyed.len());
        for (key, profile) in keyed {
            let user_id = key
                .parse::<u64>()
                .map_err(|_| StoreError::Corrupt(format!("Invalid user id key '{}'", key)))?;
            records.insert(user_id, profile);
        }
        Ok(records)
    }

    /// Serialize `records` and atomically replace the document on disk.
    fn write_document(&self, records: &HashMap<u64, GearProfile>) -> StoreResult<()> {
        let keyed: HashMap<String, &GearProfile> = records
            .iter()
            .map(|(user_id, profile)| (user_id.to_string(), profile))
            .collect();
        let serialized = serde_json::to_vec_pretty(&keyed)
            .map_err(|e| StoreError::Io(format!("Failed to serialize store document: {}", e)))?;

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| StoreError::Io(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(&serialized)
            .map_err(|e| StoreError::Io(format!("Failed to write store document: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::Io(format!("Failed to sync store document: {}", e)))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::Io(format!("Failed to replace store document: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl GearStore for DocumentStore {
    async fn upsert(&self, user_id: u64, profile: GearProfile) -> StoreResult<()> {
        let mut records = self.records.write().await;

        // Durable first: commit the post-upsert map to disk, then apply
        // it in memory. An error here leaves both sides on the prior
        // committed state.
        let mut next = records.clone();
        next.insert(user_id, profile);
        self.write_document(&next)?;
        *records = next;

        debug!("upserted gear record for user {}", user_id);
        Ok(())
    }

    async fn get(&self, user_id: u64) -> StoreResult<Option<GearProfile>> {
        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn get_all(&self) -> StoreResult<HashMap<u64, GearProfile>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }
}
