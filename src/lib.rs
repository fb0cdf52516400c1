// ============================================================================
// Gearbook Library
// ============================================================================

pub mod core;
pub mod facade;
pub mod proof;
pub mod scoring;
pub mod storage;

// Re-export main types for convenience
pub use core::{
    BlobError, GearError, GearPatch, GearProfile, GearState, GearSubmission, Result, StoreError,
    StoreResult,
};
pub use facade::{GearConfig, GearService, RankedProfile};
pub use proof::{ProofFetcher, ProofSource, ProofStore, ProofUpload};
pub use storage::{DocumentStore, GearStore, MemoryStore};
