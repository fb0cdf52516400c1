use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::GearStore;
use crate::core::{GearProfile, StoreResult};

/// Volatile backend: the full map behind a single lock, nothing on disk.
///
/// Writers take the lock exclusively, readers share it; `get_all` clones
/// the map out so callers rank over a stable snapshot.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<u64, GearProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GearStore for MemoryStore {
    async fn upsert(&self, user_id: u64, profile: GearProfile) -> StoreResult<()> {
        let mut records = self.records.write().await;
        records.insert(user_id, profile);
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
