use khelbharat_core::db::open_db_in_memory;
use khelbharat_core::{SlotRepository, SqliteSlotRepository, StoreError};
use rusqlite::Connection;

#[test]
fn get_returns_none_for_unwritten_slot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert_eq!(repo.get_slot("missing").unwrap(), None);
}

#[test]
fn set_overwrites_and_remove_reports_existence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.set_slot("khelbharatTheme", "light").unwrap();
    repo.set_slot("khelbharatTheme", "dark").unwrap();
    assert_eq!(
        repo.get_slot("khelbharatTheme").unwrap().as_deref(),
        Some("dark")
    );

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    assert!(repo.remove_slot("khelbharatTheme").unwrap());
    assert!(!repo.remove_slot("khelbharatTheme").unwrap());
    assert_eq!(repo.get_slot("khelbharatTheme").unwrap(), None);
}

#[test]
fn values_are_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let raw = "[{\"id\":1,\"name\":\"Ünal 🏃\"}]  ";

    repo.set_slot("snapshot", raw).unwrap();
    assert_eq!(repo.get_slot("snapshot").unwrap().as_deref(), Some(raw));
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSlotRepository::try_new(&conn)
        .err()
        .expect("raw connection must be rejected");
    assert!(matches!(err, StoreError::SchemaNotReady));
}
