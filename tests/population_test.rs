use bevy::utils::HashSet;
use peppered_moths::{Morph, MothId, PopulationError, PopulationStore};

/// Starting population honours the requested morph ratio
#[test]
fn test_initialize_splits_population_by_dark_percent() {
    let mut store = PopulationStore::new();
    store.initialize(100, 2);

    assert_eq!(store.len(), 100);
    assert_eq!(store.count_by_morph(Morph::Dark), 2);
    assert_eq!(store.count_by_morph(Morph::Light), 98);

    store.initialize(20, 0);
    assert_eq!(store.count_by_morph(Morph::Dark), 0);
    assert_eq!(store.count_by_morph(Morph::Light), 20);

    store.initialize(30, 100);
    assert_eq!(store.count_by_morph(Morph::Dark), 30);
    assert_eq!(store.count_by_morph(Morph::Light), 0);
}

/// Identifiers are unique and keep increasing across clears and re-initialisation
#[test]
fn test_ids_are_never_reused() {
    let mut store = PopulationStore::new();
    store.initialize(50, 40);
    let first: HashSet<MothId> = store.iter().map(|m| m.id).collect();
    assert_eq!(first.len(), 50, "ids within a population must be distinct");
    let first_max = first.iter().max().copied().unwrap();

    store.clear();
    assert!(store.is_empty());

    store.initialize(50, 40);
    assert!(
        store.iter().all(|m| m.id > first_max),
        "ids must not be recycled after a clear"
    );

    let born = store.stage_birth(Morph::Dark);
    assert!(store.iter().all(|m| m.id < born));
}

/// Staged removals and births stay invisible until commit
#[test]
fn test_staged_changes_hidden_until_commit() {
    let mut store = PopulationStore::new();
    store.initialize(20, 50);

    let victim = store.moths_by_morph(Morph::Dark).next().unwrap().id;
    store.stage_removal(victim).unwrap();
    let newborn = store.stage_birth(Morph::Light);

    assert_eq!(store.count_by_morph(Morph::Dark), 10);
    assert_eq!(store.count_by_morph(Morph::Light), 10);
    assert!(store.contains(victim));
    assert!(!store.contains(newborn));
    assert_eq!(store.staged(), (1, 1));

    let report = store.commit();

    assert_eq!(store.count_by_morph(Morph::Dark), 9);
    assert_eq!(store.count_by_morph(Morph::Light), 11);
    assert!(!store.contains(victim));
    assert!(store.contains(newborn));
    assert_eq!(store.staged(), (0, 0));

    assert_eq!(report.eaten.len(), 1);
    assert_eq!(report.eaten[0].id, victim);
    assert_eq!(report.eaten[0].morph, Morph::Dark);
    assert_eq!(report.born.len(), 1);
    assert_eq!(report.born[0].id, newborn);
    assert_eq!(report.born[0].morph, Morph::Light);
}

/// The store itself does not pair removals with births
#[test]
fn test_commit_does_not_enforce_conservation() {
    let mut store = PopulationStore::new();
    store.initialize(20, 0);

    let ids: Vec<MothId> = store.iter().take(3).map(|m| m.id).collect();
    for id in ids {
        store.stage_removal(id).unwrap();
    }
    store.commit();
    assert_eq!(store.len(), 17);

    store.stage_birth(Morph::Dark);
    store.commit();
    assert_eq!(store.len(), 18);
    assert_eq!(store.count_by_morph(Morph::Dark), 1);
}

#[test]
fn test_invalid_staging_is_rejected() {
    let mut store = PopulationStore::new();
    store.initialize(20, 50);

    assert_eq!(
        store.stage_removal(MothId(9_999)),
        Err(PopulationError::UnknownMoth(MothId(9_999)))
    );

    let id = store.iter().next().unwrap().id;
    store.stage_removal(id).unwrap();
    assert_eq!(
        store.stage_removal(id),
        Err(PopulationError::AlreadyStaged(id))
    );

    // A staged newborn is not part of the population yet.
    let newborn = store.stage_birth(Morph::Light);
    assert_eq!(
        store.stage_removal(newborn),
        Err(PopulationError::UnknownMoth(newborn))
    );
}

/// Clearing drops staged work along with the population
#[test]
fn test_clear_discards_staging() {
    let mut store = PopulationStore::new();
    store.initialize(20, 50);
    let id = store.iter().next().unwrap().id;
    store.stage_removal(id).unwrap();
    store.stage_birth(Morph::Dark);

    store.clear();
    assert_eq!(store.staged(), (0, 0));

    let report = store.commit();
    assert!(report.born.is_empty());
    assert!(report.eaten.is_empty());
    assert!(store.is_empty());
}
