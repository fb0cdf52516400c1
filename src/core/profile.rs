use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::GearError;
use crate::proof::ProofUpload;
use crate::scoring;

/// Progression state of a character build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearState {
    Awakening,
    Succession,
}

impl FromStr for GearState {
    type Err = GearError;

    /// Case-insensitive: "Awakening", "succession" and "AWAKENING" all
    /// parse; anything else is rejected before it can reach a store.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "awakening" => Ok(Self::Awakening),
            "succession" => Ok(Self::Succession),
            _ => Err(GearError::InvalidState(s.to_string())),
        }
    }
}

impl fmt::Display for GearState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Awakening => write!(f, "Awakening"),
            Self::Succession => write!(f, "Succession"),
        }
    }
}

/// One user's recorded gear. The sole persisted entity; keyed by user id
/// in the store, so the id is not a field here.
///
/// `gearscore` is derived from `ap`/`aap`/`dp` and kept private: it is
/// refreshed on construction and on every patch, never set by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearProfile {
    pub familyname: Option<String>,
    pub class: String,
    pub state: GearState,
    pub ap: i64,
    pub aap: i64,
    pub dp: i64,
    gearscore: f64,
    pub proof_path: Option<String>,
}

impl GearProfile {
    pub fn new(
        familyname: Option<String>,
        class: String,
        state: GearState,
        ap: i64,
        aap: i64,
        dp: i64,
    ) -> Self {
        let mut profile = Self {
            familyname,
            class,
            state,
            ap,
            aap,
            dp,
            gearscore: 0.0,
            proof_path: None,
        };
        profile.refresh_score();
        profile
    }

    /// Derived score, `(ap + aap) / 2 + dp` rounded to two decimals.
    pub fn gearscore(&self) -> f64 {
        self.gearscore
    }

    pub(crate) fn refresh_score(&mut self) {
        self.gearscore = scoring::score(self.ap, self.aap, self.dp);
    }
}

/// Full set of caller-supplied fields for a `set` (create-or-replace).
#[derive(Debug)]
pub struct GearSubmission {
    pub familyname: Option<String>,
    pub class: String,
    pub state: GearState,
    pub ap: i64,
    pub aap: i64,
    pub dp: i64,
    pub proof: Option<ProofUpload>,
}

impl GearSubmission {
    pub(crate) fn into_profile(self) -> (GearProfile, Option<ProofUpload>) {
        let profile = GearProfile::new(
            self.familyname,
            self.class,
            self.state,
            self.ap,
            self.aap,
            self.dp,
        );
        (profile, self.proof)
    }
}

/// Partial update for an existing record: only supplied fields overwrite,
/// omitted fields keep their stored value.
#[derive(Debug, Default)]
pub struct GearPatch {
    pub familyname: Option<String>,
    pub class: Option<String>,
    pub state: Option<GearState>,
    pub ap: Option<i64>,
    pub aap: Option<i64>,
    pub dp: Option<i64>,
    pub proof: Option<ProofUpload>,
}

impl GearPatch {
    /// Merge into `profile` and refresh the derived score. The proof, if
    /// any, is returned to the caller — storing it is the façade's job,
    /// and a failed proof must not block the merge.
    pub(crate) fn apply(self, profile: &mut GearProfile) -> Option<ProofUpload> {
        if let Some(familyname) = self.familyname {
            profile.familyname = Some(familyname);
        }
        if let Some(class) = self.class {
            profile.class = class;
        }
        if let Some(state) = self.state {
            profile.state = state;
        }
        if let Some(ap) = self.ap {
            profile.ap = ap;
        }
        if let Some(aap) = self.aap {
            profile.aap = aap;
        }
        if let Some(dp) = self.dp {
            profile.dp = dp;
        }
        profile.refresh_score();
        self.proof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parses_case_insensitively() {
        assert_eq!("Awakening".parse::<GearState>().unwrap(), GearState::Awakening);
        assert_eq!("succession".parse::<GearState>().unwrap(), GearState::Succession);
        assert_eq!("AWAKENING".parse::<GearState>().unwrap(), GearState::Awakening);
    }

    #[test]
    fn test_state_rejects_unknown_values() {
        let err = "awoken".parse::<GearState>().unwrap_err();
        assert!(matches!(err, GearError::InvalidState(ref s) if s == "awoken"));
    }

    #[test]
    fn test_state_serializes_canonically() {
        let json = serde_json::to_string(&GearState::Succession).unwrap();
        assert_eq!(json, "\"Succession\"");
    }

    #[test]
    fn test_new_profile_computes_score() {
        let profile = GearProfile::new(
            None,
            "Witch".to_string(),
            GearState::Succession,
            200,
            150,
            300,
        );
        assert_eq!(profile.gearscore(), 475.0);
    }

    #[test]
    fn test_patch_overwrites_only_supplied_fields() {
        let mut profile = GearProfile::new(
            Some("Moonveil".to_string()),
            "Warrior".to_string(),
            GearState::Awakening,
            100,
            100,
            100,
        );
        assert_eq!(profile.gearscore(), 200.0);

        let patch = GearPatch {
            dp: Some(150),
            ..GearPatch::default()
        };
        let proof = patch.apply(&mut profile);

        assert!(proof.is_none());
        assert_eq!(profile.familyname.as_deref(), Some("Moonveil"));
        assert_eq!(profile.class, "Warrior");
        assert_eq!(profile.state, GearState::Awakening);
        assert_eq!(profile.ap, 100);
        assert_eq!(profile.aap, 100);
        assert_eq!(profile.dp, 150);
        assert_eq!(profile.gearscore(), 250.0);
    }

    #[test]
    fn test_profile_round_trips_through_json() {
        let mut profile = GearProfile::new(
            Some("Moonveil".to_string()),
            "Witch".to_string(),
            GearState::Succession,
            250,
            260,
            310,
        );
        profile.proof_path = Some("proofs/42_proof.png".to_string());

        let json = serde_json::to_string(&profile).unwrap();
        let restored: GearProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
    }
}
