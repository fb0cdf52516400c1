use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct GearConfig {
    /// Path of the JSON record document.
    pub data_file: PathBuf,

    /// Directory proof attachments are written into.
    pub proofs_dir: PathBuf,

    /// Hard timeout for proof downloads.
    pub fetch_timeout: Duration,
}

impl GearConfig {
    /// Defaults rooted at `data_dir`: `gear_data.json` next to a
    /// `proofs/` subdirectory, 30s download timeout.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            data_file: data_dir.join("gear_data.json"),
            proofs_dir: data_dir.join("proofs"),
            fetch_timeout: Duration::from_secs(30),
        }
    }

    /// Set the record document path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Set the proof attachment directory
    pub fn proofs_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.proofs_dir = path.into();
        self
    }

    /// Set the proof download timeout
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
