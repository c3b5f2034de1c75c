use khelbharat_core::db::open_db_in_memory;
use khelbharat_core::{
    normalize_record, seed_athletes, Athlete, AthleteRegistry, AthleteStore, Career, NewAthlete,
    SlotRepository,
    SqliteSlotRepository, StorageConfig, StorageError, StoreError, StoreResult, Theme,
    CAREER_LEVEL_NOT_SET,
};
use serde_json::json;

const ATHLETES_SLOT: &str = "khelbharatAthletes";

/// Storage that refuses every operation, like a disabled browser store.
struct DisabledSlots;

impl SlotRepository for DisabledSlots {
    fn get_slot(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set_slot(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn remove_slot(&self, _key: &str) -> StoreResult<bool> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}

#[test]
fn load_without_snapshot_returns_seed_roster() {
    let conn = open_db_in_memory().unwrap();
    let store = AthleteStore::new(SqliteSlotRepository::try_new(&conn).unwrap());

    assert!(store.try_load().unwrap().is_none());
    let athletes = store.load();
    assert_eq!(athletes, seed_athletes());
    let levels: Vec<&str> = athletes.iter().map(|a| a.career.level.as_str()).collect();
    assert_eq!(levels, vec!["National", "International", "National"]);
}

#[test]
fn load_with_corrupt_snapshot_falls_back_to_seed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.set_slot(ATHLETES_SLOT, "{not json").unwrap();
    let store = AthleteStore::new(&repo);

    assert!(matches!(
        store.try_load().unwrap_err(),
        StorageError::Corrupt(_)
    ));
    assert_eq!(store.load(), seed_athletes());
}

#[test]
fn load_from_unreadable_store_falls_back_to_seed() {
    let store = AthleteStore::new(DisabledSlots);

    assert!(matches!(store.try_load().unwrap_err(), StorageError::Read(_)));
    assert_eq!(store.load().len(), 3);
    assert_eq!(store.load_theme(), Theme::Light);
}

#[test]
fn save_failure_is_reported_without_panicking() {
    let store = AthleteStore::new(DisabledSlots);

    let err = store.save(&seed_athletes()).unwrap_err();
    assert!(matches!(err, StorageError::Write(StoreError::Unavailable(_))));
    assert!(store.save_theme(Theme::Dark).is_err());
}

#[test]
fn save_then_load_round_trips_roster() {
    let conn = open_db_in_memory().unwrap();
    let store = AthleteStore::new(SqliteSlotRepository::try_new(&conn).unwrap());

    let mut athletes = seed_athletes();
    athletes[1].avatar = Some("data:image/png;base64,iVBORw==".to_string());
    athletes[2].points = 92.25;
    athletes.remove(0);

    store.save(&athletes).unwrap();
    assert_eq!(store.load(), athletes);
}

#[test]
fn legacy_records_are_backfilled_and_unknown_fields_kept() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let legacy = json!([
        {
            "id": 4,
            "name": "Old Format",
            "age": 30,
            "sport": "Shot Put",
            "country": "Kenya",
            "points": 70,
            "coachNote": "imported from v1"
        },
        {
            "id": 5,
            "name": "Partial Career",
            "age": 19,
            "sport": "Hurdles",
            "country": "India",
            "gender": "Female",
            "points": 64.5,
            "avatar": null,
            "injuries": null,
            "career": { "nextGoal": "Junior nationals", "mentor": "R. Singh" },
            "finance": { "stipend": 12000 }
        }
    ]);
    repo.set_slot(ATHLETES_SLOT, &legacy.to_string()).unwrap();

    let store = AthleteStore::new(&repo);
    let athletes = store.load();
    assert_eq!(athletes.len(), 2);

    let old = &athletes[0];
    assert_eq!(old.gender, "");
    assert_eq!(old.avatar, None);
    assert!(old.injuries.is_empty());
    assert!(old.performance_history.is_empty());
    assert_eq!(old.career, Career::default());
    assert_eq!(old.finance.monthly_total(), 0.0);
    assert_eq!(old.extra["coachNote"], "imported from v1");

    let partial = &athletes[1];
    assert_eq!(partial.career.level, CAREER_LEVEL_NOT_SET);
    assert_eq!(partial.career.next_goal, "Junior nationals");
    assert_eq!(partial.career.extra["mentor"], "R. Singh");
    assert_eq!(partial.finance.stipend, 12000.0);
    assert_eq!(partial.finance.sponsorship, 0.0);
    assert!(partial.injuries.is_empty());

    store.save(&athletes).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&repo.get_slot(ATHLETES_SLOT).unwrap().unwrap()).unwrap();
    assert_eq!(written[0]["coachNote"], "imported from v1");
    assert_eq!(written[1]["career"]["mentor"], "R. Singh");
    assert_eq!(written[1]["performanceHistory"], json!([]));
}

#[test]
fn normalization_is_idempotent() {
    let raw = json!({
        "id": 9,
        "name": "Idem Potent",
        "points": 12,
        "career": { "level": "State" },
        "injuries": [{ "id": 2, "type": "Cramp", "status": "Cleared", "extraFlag": true }],
        "legacyRank": 3
    });

    let once = normalize_record(raw).unwrap();
    let twice = normalize_record(serde_json::to_value(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.injuries[0].extra["extraFlag"], true);
}

#[test]
fn record_with_only_id_normalizes_to_blank_athlete() {
    let athlete = normalize_record(json!({ "id": 12 })).unwrap();
    assert_eq!(athlete, Athlete::with_id(12));
}

#[test]
fn theme_slot_round_trips_and_ignores_unknown_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = AthleteStore::new(&repo);

    assert_eq!(store.load_theme(), Theme::Light);
    store.save_theme(Theme::Dark).unwrap();
    assert_eq!(store.load_theme(), Theme::Dark);
    assert_eq!(
        repo.get_slot("khelbharatTheme").unwrap().as_deref(),
        Some("dark")
    );

    repo.set_slot("khelbharatTheme", "solarized").unwrap();
    assert_eq!(store.load_theme(), Theme::Light);
}

#[test]
fn custom_slot_names_are_respected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = AthleteStore::with_config(
        &repo,
        StorageConfig {
            athletes_slot: "club.roster".to_string(),
            theme_slot: "club.theme".to_string(),
        },
    );

    store.save(&seed_athletes()[..1]).unwrap();
    assert!(repo.get_slot("club.roster").unwrap().is_some());
    assert!(repo.get_slot(ATHLETES_SLOT).unwrap().is_none());
}

#[test]
fn loosely_typed_ages_load_next_to_valid_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let raw = json!([
        { "id": 10, "name": "Kept A", "age": 30, "sport": "Shot Put", "points": 70 },
        { "id": 11, "name": "Kept B", "age": 22.5, "sport": "Discus", "points": "64" },
        { "id": 12, "name": "Kept C", "age": -1, "sport": "Hammer", "points": 51 }
    ]);
    repo.set_slot(ATHLETES_SLOT, &raw.to_string()).unwrap();

    let athletes = AthleteStore::new(&repo).load();
    let loaded: Vec<(u32, &str, u32)> = athletes
        .iter()
        .map(|a| (a.id, a.name.as_str(), a.age))
        .collect();
    assert_eq!(
        loaded,
        vec![(10, "Kept A", 30), (11, "Kept B", 22), (12, "Kept C", 0)]
    );
    assert_eq!(athletes[1].points, 64.0);
}

#[test]
fn unusable_record_is_skipped_and_the_rest_survive_the_next_save() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let raw = json!([
        { "id": 10, "name": "Kept A", "age": 30, "sport": "Shot Put" },
        { "name": "No id at all" },
        { "id": 11, "name": "Kept B", "age": 22.5, "sport": "Discus" }
    ]);
    repo.set_slot(ATHLETES_SLOT, &raw.to_string()).unwrap();

    let mut registry = AthleteRegistry::open(AthleteStore::new(&repo));
    let names: Vec<&str> = registry.athletes().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Kept A", "Kept B"]);
    assert_eq!(registry.current_id(), Some(10));

    let created = registry
        .create(NewAthlete {
            name: "Newcomer".to_string(),
            age: 19,
            sport: "Javelin".to_string(),
            country: "India".to_string(),
            gender: "Male".to_string(),
            points: 40.0,
            career_level: None,
            next_goal: None,
            stipend: 0.0,
            sponsorship: 0.0,
        })
        .unwrap();
    assert_eq!(created.id, 12);

    let stored = AthleteStore::new(&repo).try_load().unwrap().unwrap();
    let stored_names: Vec<&str> = stored.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(stored_names, vec!["Kept A", "Kept B", "Newcomer"]);
    assert_eq!(stored[1].age, 22);
}

#[test]
fn snapshot_with_no_usable_record_falls_back_to_seed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.set_slot(ATHLETES_SLOT, r#"[{"name": "orphan"}, 42]"#)
        .unwrap();
    let store = AthleteStore::new(&repo);

    assert!(matches!(
        store.try_load().unwrap_err(),
        StorageError::Corrupt(_)
    ));
    assert_eq!(store.load(), seed_athletes());
}
