pub mod error;
pub mod profile;

pub use error::{BlobError, GearError, Result, StoreError, StoreResult};
pub use profile::{GearPatch, GearProfile, GearState, GearSubmission};
