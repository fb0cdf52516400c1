/// Store contract tests
///
/// The same persistence contract exercised against every backend.
/// Run with: cargo test --test store_contract_tests

use std::sync::Arc;

use gearbook::{DocumentStore, GearProfile, GearState, GearStore, MemoryStore};
use tempfile::TempDir;

fn profile(class: &str, ap: i64, aap: i64, dp: i64) -> GearProfile {
    GearProfile::new(
        Some("Moonveil".to_string()),
        class.to_string(),
        GearState::Awakening,
        ap,
        aap,
        dp,
    )
}

fn backends() -> (Vec<Arc<dyn GearStore>>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let document = DocumentStore::open(temp_dir.path().join("gear_data.json")).unwrap();
    let stores: Vec<Arc<dyn GearStore>> = vec![Arc::new(MemoryStore::new()), Arc::new(document)];
    (stores, temp_dir)
}

#[tokio::test]
async fn test_upsert_then_get_round_trips() {
    let (stores, _guard) = backends();
    for store in stores {
        let p = profile("Witch", 200, 150, 300);
        store.upsert(42, p.clone()).await.unwrap();
        assert_eq!(store.get(42).await.unwrap(), Some(p));
    }
}

#[tokio::test]
async fn test_missing_record_is_none_not_error() {
    let (stores, _guard) = backends();
    for store in stores {
        assert_eq!(store.get(42).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_upsert_replaces_the_record_in_full() {
    let (stores, _guard) = backends();
    for store in stores {
        let mut first = profile("Witch", 100, 100, 100);
        first.proof_path = Some("proofs/42_old.png".to_string());
        store.upsert(42, first).await.unwrap();

        // No field of the first write may survive, including the ones the
        // second write leaves unset.
        let second = GearProfile::new(
            None,
            "Warrior".to_string(),
            GearState::Succession,
            200,
            150,
            300,
        );
        store.upsert(42, second.clone()).await.unwrap();

        let stored = store.get(42).await.unwrap().unwrap();
        assert_eq!(stored, second);
        assert_eq!(stored.familyname, None);
        assert_eq!(stored.proof_path, None);
    }
}

#[tokio::test]
async fn test_get_all_returns_every_committed_record() {
    let (stores, _guard) = backends();
    for store in stores {
        store.upsert(1, profile("Witch", 100, 100, 100)).await.unwrap();
        store.upsert(2, profile("Warrior", 200, 150, 300)).await.unwrap();
        store.upsert(3, profile("Ranger", 150, 150, 200)).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all.get(&2).unwrap().class, "Warrior");
    }
}

#[tokio::test]
async fn test_get_all_on_empty_store_is_empty() {
    let (stores, _guard) = backends();
    for store in stores {
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
