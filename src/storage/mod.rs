pub mod document;
pub mod memory;

pub use document::DocumentStore;
pub use memory::MemoryStore;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::{GearProfile, StoreResult};

/// Persistence contract for gear records.
///
/// Backends differ in durability, not semantics: `upsert` atomically
/// replaces the whole record for a user (a reader never observes mixed
/// old/new fields), `get` treats absence as a normal empty result, and
/// `get_all` returns a snapshot of every record committed before the
/// call started.
#[async_trait]
pub trait GearStore: Send + Sync {
    /// Insert or fully replace the record for `user_id`.
    async fn upsert(&self, user_id: u64, profile: GearProfile) -> StoreResult<()>;

    /// Point lookup; `Ok(None)` when no record exists.
    async fn get(&self, user_id: u64) -> StoreResult<Option<GearProfile>>;

    /// Snapshot of all records, keyed by user id.
    async fn get_all(&self) -> StoreResult<HashMap<u64, GearProfile>>;
}
