//! High-level operations the chat adapter calls.
//!
//! `GearService` owns the validation ordering, merge discipline, score
//! recomputation and proof handling so the adapter stays a thin renderer.
//! Every operation is atomic per call: it fully succeeds or leaves prior
//! state untouched.

use std::sync::Arc;

use log::warn;

use crate::core::{GearError, GearPatch, GearProfile, GearSubmission, Result};
use crate::facade::GearConfig;
use crate::proof::{ProofFetcher, ProofSource, ProofStore, ProofUpload};
use crate::scoring;
use crate::storage::{DocumentStore, GearStore};

/// One leaderboard row.
#[derive(Debug, Clone)]
pub struct RankedProfile {
    /// Presentational position label ("1st", "2nd", ...).
    pub placement: String,
    pub user_id: u64,
    pub profile: GearProfile,
}

/// Gear profile service over a record store, a proof sink and a ranking
/// pass.
///
/// # Examples
///
/// ```no_run
/// use gearbook::{GearConfig, GearService, GearState, GearSubmission};
///
/// # async fn demo() -> gearbook::Result<()> {
/// let service = GearService::open(GearConfig::new("data"))?;
///
/// let profile = service
///     .set(42, GearSubmission {
///         familyname: Some("Moonveil".to_string()),
///         class: "Witch".to_string(),
///         state: GearState::Succession,
///         ap: 200,
///         aap: 150,
///         dp: 300,
///         proof: None,
///     })
///     .await?;
/// assert_eq!(profile.gearscore(), 475.0);
///
/// for row in service.leaderboard().await? {
///     println!("{} {} ({})", row.placement, row.profile.class, row.profile.gearscore());
/// }
/// # Ok(())
/// # }
/// ```
pub struct GearService {
    store: Arc<dyn GearStore>,
    proofs: ProofStore,
    fetcher: ProofFetcher,
}

impl GearService {
    /// Open the service over the durable document backend.
    ///
    /// This is the one-shot initialization point: it creates the data
    /// directory and loads existing records. Calling it again with the
    /// same config re-opens the same store.
    pub fn open(config: GearConfig) -> Result<Self> {
        let store = DocumentStore::open(&config.data_file)?;
        Self::with_store(Arc::new(store), &config)
    }

    /// Service over a caller-supplied backend; used by tests and
    /// embedders that bring their own persistence.
    pub fn with_store(store: Arc<dyn GearStore>, config: &GearConfig) -> Result<Self> {
        let fetcher = ProofFetcher::new(config.fetch_timeout)?;
        Ok(Self {
            store,
            proofs: ProofStore::new(&config.proofs_dir),
            fetcher,
        })
    }

    /// Create or fully replace the caller's gear record.
    ///
    /// The score is derived before persistence. A failed proof transfer
    /// is logged and the profile still saves without the reference.
    pub async fn set(&self, user_id: u64, submission: GearSubmission) -> Result<GearProfile> {
        let (mut profile, proof) = submission.into_profile();
        if let Some(upload) = proof {
            profile.proof_path = self.store_proof(user_id, upload).await;
        }
        self.store.upsert(user_id, profile.clone()).await?;
        Ok(profile)
    }

    /// Merge the supplied fields into the caller's existing record.
    ///
    /// Updating a user with no record is `GearError::NoProfile`. A proof
    /// failure keeps the previously stored proof reference.
    pub async fn update(&self, user_id: u64, patch: GearPatch) -> Result<GearProfile> {
        let mut profile = self
            .store
            .get(user_id)
            .await?
            .ok_or(GearError::NoProfile(user_id))?;

        let proof = patch.apply(&mut profile);
        if let Some(upload) = proof {
            if let Some(path) = self.store_proof(user_id, upload).await {
                profile.proof_path = Some(path);
            }
        }

        self.store.upsert(user_id, profile.clone()).await?;
        Ok(profile)
    }

    /// Fetch one record; `Ok(None)` when the user has no gear stored.
    pub async fn show(&self, user_id: u64) -> Result<Option<GearProfile>> {
        Ok(self.store.get(user_id).await?)
    }

    /// All records ranked by gearscore, best first. An empty store yields
    /// an empty leaderboard, not an error.
    pub async fn leaderboard(&self) -> Result<Vec<RankedProfile>> {
        let records = self.store.get_all().await?;
        let ranked = scoring::rank(records);
        Ok(ranked
            .into_iter()
            .enumerate()
            .map(|(index, (user_id, profile))| RankedProfile {
                placement: scoring::placement(index + 1),
                user_id,
                profile,
            })
            .collect())
    }

    /// Whether a stored proof reference still resolves on disk.
    pub fn proof_exists(&self, path: &str) -> bool {
        ProofStore::exists(path)
    }

    /// Resolve and persist a proof upload. Runs entirely outside the
    /// store lock; any failure is logged and reported as `None`.
    async fn store_proof(&self, user_id: u64, upload: ProofUpload) -> Option<String> {
        let ProofUpload { filename, source } = upload;
        let data = match source {
            ProofSource::Bytes(data) => data,
            ProofSource::Url(url) => match self.fetcher.fetch(&url).await {
                Ok(data) => data,
                Err(err) => {
                    warn!("proof download for user {} failed: {}", user_id, err);
                    return None;
                }
            },
        };

        match self.proofs.save(user_id, &data, &filename) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("proof save for user {} failed: {}", user_id, err);
                None
            }
        }
    }
}
