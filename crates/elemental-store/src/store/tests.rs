use super::*;
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;
use chrono::{TimeZone, Utc};
use elemental_core::{
    AppSettings, Archetype, DistributionMode, Element, ElementMapping, ElementScores, Participant,
};

async fn test_store() -> SqliteSnapshotStore {
    SqliteSnapshotStore::in_memory().await.unwrap()
}

fn sample_snapshot() -> Snapshot {
    Snapshot {
        participants: vec![
            Participant::new(2).with_name("Dana").with_answer(6, 1).with_answer(7, 4),
            Participant::new(1).with_answer(6, 3),
            Participant::new(2).with_answer(8, 2),
        ],
        mappings: vec![
            ElementMapping::new(
                6,
                [Element::Fire, Element::Water, Element::Air, Element::Earth],
            ),
            ElementMapping::new(
                7,
                [Element::Water, Element::Air, Element::Earth, Element::Fire],
            ),
        ],
        archetypes: vec![
            Archetype::new(1, ElementScores::new(40.0, 20.0, 25.0, 15.0))
                .with_name("Spark")
                .with_description("Energetic"),
            Archetype::new(2, ElementScores::new(20.0, 40.0, 15.0, 25.0)),
        ],
        settings: AppSettings::default()
            .with_threshold(25.0)
            .with_mode(DistributionMode::Wide),
        saved_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
    }
}

#[test]
fn test_default_data_dir() {
    let dir = default_data_dir();
    assert!(dir.to_string_lossy().contains("elemental"));
    assert!(default_db_path().ends_with("elemental.db"));
}

#[tokio::test]
async fn test_empty_store_loads_default() {
    let store = test_store().await;
    let snap = store.load().await.unwrap();
    assert_eq!(snap, Snapshot::default());
    assert_eq!(store.name(), "sqlite");
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let store = test_store().await;
    let snap = sample_snapshot();
    store.save(&snap).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, snap);
    // Duplicate participant ids keep their original order.
    let ids: Vec<_> = loaded.participants.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1, 2]);
    assert_eq!(store.participant_count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_save_replaces_previous_rows() {
    let store = test_store().await;
    store.save(&sample_snapshot()).await.unwrap();

    let smaller = Snapshot {
        participants: vec![Participant::new(9)],
        ..Default::default()
    };
    store.save(&smaller).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.participants.len(), 1);
    assert!(loaded.mappings.is_empty());
    assert!(loaded.archetypes.is_empty());
    assert_eq!(loaded.settings, AppSettings::default());
    assert!(loaded.saved_at.is_some());
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("elemental.db");

    {
        let store = SqliteSnapshotStore::from_path(&path).await.unwrap();
        store.save(&sample_snapshot()).await.unwrap();
    }

    let reopened = SqliteSnapshotStore::from_path(&path).await.unwrap();
    let loaded = reopened.load().await.unwrap();
    assert_eq!(loaded.archetypes[0].name.as_deref(), Some("Spark"));
    assert_eq!(loaded.settings.distribution_mode, DistributionMode::Wide);
}
