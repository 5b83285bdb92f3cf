//! Integration tests for Elemental
//!
//! These tests verify the integration between the crates:
//! - elemental-core: scoring, matching and distribution statistics
//! - elemental-store: SQLite persistence and the profile book

use elemental_core::{
    match_profiles, Archetype, DistributionMode, DistributionStats, Element, ElementMapping,
    ElementScores, Participant,
};
use elemental_store::{ProfileBook, Snapshot, SnapshotStore, SqliteSnapshotStore};

fn standard_mapping(question_id: u32) -> ElementMapping {
    ElementMapping::new(
        question_id,
        [Element::Fire, Element::Water, Element::Air, Element::Earth],
    )
}

fn three_archetypes() -> Vec<Archetype> {
    vec![
        Archetype::new(1, ElementScores::new(100.0, 0.0, 0.0, 0.0)).with_name("Blaze"),
        Archetype::new(2, ElementScores::new(0.0, 100.0, 0.0, 0.0)).with_name("Tide"),
        Archetype::new(3, ElementScores::new(0.0, 0.0, 0.0, 100.0)).with_name("Stone"),
    ]
}

// ============================================================================
// Matching Integration Tests
// ============================================================================

#[test]
fn test_normal_mode_from_raw_answers() {
    let mappings: Vec<_> = (1..=5).map(standard_mapping).collect();
    let archetypes = vec![
        Archetype::new(1, ElementScores::new(100.0, 0.0, 0.0, 0.0)),
        Archetype::new(2, ElementScores::new(0.0, 0.0, 0.0, 100.0)),
    ];
    // three fire answers, two earth answers: fire 60, earth 40
    let participant = Participant::new(1)
        .with_answer(1, 1)
        .with_answer(2, 1)
        .with_answer(3, 1)
        .with_answer(4, 4)
        .with_answer(5, 4);

    let profiles = match_profiles(&[participant], &mappings, &archetypes, DistributionMode::Normal);
    let profile = &profiles[0];
    assert!((profile.element_scores.fire - 60.0).abs() < 1e-9);
    assert!((profile.element_scores.earth - 40.0).abs() < 1e-9);
    assert_eq!(profile.matched.as_ref().unwrap().number, 1);
    assert!((profile.distance - 3200f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_wide_mode_capacity_spill() {
    let mappings = vec![standard_mapping(1)];
    let archetypes = three_archetypes();
    let participants: Vec<_> = (1..=10)
        .map(|id| Participant::new(id).with_answer(1, 1))
        .collect();

    let profiles = match_profiles(&participants, &mappings, &archetypes, DistributionMode::Wide);
    assert_eq!(profiles.len(), 10);
    let ids: Vec<_> = profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    // target ceil(10/3) = 4, cap 6: the first six keep fire
    for p in &profiles[..6] {
        assert_eq!(p.matched.as_ref().unwrap().number, 1);
        assert_eq!(p.distance, 0.0);
    }
    // water and earth tie for second place; library order wins
    for p in &profiles[6..] {
        assert_eq!(p.matched.as_ref().unwrap().number, 2);
    }

    let stats = DistributionStats::from_profiles(&profiles);
    assert_eq!(stats.entries[0].count, 6);
    assert_eq!(stats.entries[1].count, 4);
    assert!((stats.concentration() - 60.0).abs() < 1e-9);
}

#[test]
fn test_modes_agree_on_balanced_input() {
    let mappings = vec![standard_mapping(1)];
    let archetypes = three_archetypes();
    let participants = vec![
        Participant::new(3).with_answer(1, 4),
        Participant::new(1).with_answer(1, 1),
        Participant::new(2).with_answer(1, 2),
    ];

    let normal = match_profiles(&participants, &mappings, &archetypes, DistributionMode::Normal);
    let wide = match_profiles(&participants, &mappings, &archetypes, DistributionMode::Wide);

    // normal keeps input order, wide sorts by id
    assert_eq!(normal.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    assert_eq!(wide.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    for p in &wide {
        let n = normal.iter().find(|q| q.id == p.id).unwrap();
        assert_eq!(n.archetype_id(), p.archetype_id());
    }
}

// ============================================================================
// Store + Profile Book Integration Tests
// ============================================================================

#[tokio::test]
async fn test_book_on_sqlite_end_to_end() {
    let store = SqliteSnapshotStore::in_memory().await.unwrap();
    let mut book = ProfileBook::open(store).await.unwrap();
    assert!(book.profiles().is_empty());

    book.add_mapping(standard_mapping(1)).await.unwrap();
    for archetype in three_archetypes() {
        book.add_archetype(archetype).await.unwrap();
    }
    let participants: Vec<_> = (1..=10)
        .map(|id| Participant::new(id).with_answer(1, 1))
        .collect();
    book.replace_participants(participants).await.unwrap();

    assert_eq!(book.stats().entries[0].count, 10);
    assert!(book.is_high_concentration());

    let settings = book.snapshot().settings.with_mode(DistributionMode::Wide);
    book.set_settings(settings).await.unwrap();
    assert_eq!(book.stats().entries[0].count, 6);
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/elemental.db");

    {
        let store = SqliteSnapshotStore::from_path(&path).await.unwrap();
        let mut book = ProfileBook::open(store).await.unwrap();
        book.add_mapping(standard_mapping(7)).await.unwrap();
        book.add_archetype(three_archetypes().remove(2)).await.unwrap();
        book.replace_participants(vec![Participant::new(42)
            .with_name("Ada")
            .with_answer(7, 4)])
            .await
            .unwrap();
    }

    let store = SqliteSnapshotStore::from_path(&path).await.unwrap();
    assert_eq!(store.load().await.unwrap().participants.len(), 1);
    let book = ProfileBook::open(store).await.unwrap();
    let profile = &book.profiles()[0];
    assert_eq!(profile.id, 42);
    assert_eq!(profile.name.as_deref(), Some("Ada"));
    assert_eq!(profile.element_scores.earth, 100.0);
    assert_eq!(profile.matched.as_ref().unwrap().name.as_deref(), Some("Stone"));
    assert!(book.snapshot().saved_at.is_some());
}

#[tokio::test]
async fn test_snapshot_json_moves_between_stores() {
    let source = SqliteSnapshotStore::in_memory().await.unwrap();
    let mut book = ProfileBook::open(source).await.unwrap();
    book.add_mapping(standard_mapping(1)).await.unwrap();
    book.add_archetype(three_archetypes().remove(0)).await.unwrap();
    book.replace_participants(vec![Participant::new(1).with_answer(1, 1)])
        .await
        .unwrap();
    let json = book.snapshot().to_json().unwrap();

    let target = SqliteSnapshotStore::in_memory().await.unwrap();
    let mut copy = ProfileBook::open(target).await.unwrap();
    copy.replace_snapshot(Snapshot::from_json(&json).unwrap())
        .await
        .unwrap();
    assert_eq!(copy.profiles(), book.profiles());
}

#[tokio::test]
async fn test_store_name() {
    let store = SqliteSnapshotStore::in_memory().await.unwrap();
    assert_eq!(store.name(), "sqlite");
    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot, Snapshot::default());
}
