use thiserror::Error;

/// Storage-engine failures. Absence of a record is not an error — lookups
/// return `Ok(None)` and full scans return an empty map.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt record store: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Proof attachment failures. Never fatal to the profile write that
/// triggered them: the profile is persisted without the proof reference.
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Source returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Write failed: {0}")]
    Io(String),
}

#[derive(Error, Debug)]
pub enum GearError {
    #[error("Invalid state '{0}': only 'Awakening' or 'Succession' allowed")]
    InvalidState(String),

    #[error("No gear profile recorded for user {0}")]
    NoProfile(u64),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Proof error: {0}")]
    Blob(#[from] BlobError),
}

pub type Result<T> = std::result::Result<T, GearError>;
