use hindsight::db;
use hindsight::db::migrations::{get_schema_version, has_column, run_migrations, CURRENT_SCHEMA_VERSION};
use rusqlite::Connection;

/// A v1 database as an older release left it: `memory` has no `updated_at`.
fn v1_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    conn
}

#[test]
fn fresh_db_migrates_to_current_version() {
    let conn = db::open_memory_database().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    assert!(has_column(&conn, "memory", "updated_at").unwrap());
}

#[test]
fn migrations_are_idempotent() {
    let mut conn = db::open_memory_database().unwrap();
    run_migrations(&mut conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn manual_v1_db_upgrades_and_backfills() {
    let mut conn = v1_db();
    assert_eq!(get_schema_version(&conn).unwrap(), 1);
    assert!(!has_column(&conn, "memory", "updated_at").unwrap());

    conn.execute(
        "INSERT INTO memory (content, category, importance, created_at) VALUES ('old note', 'misc', 4, 1700000000)",
        [],
    )
    .unwrap();

    run_migrations(&mut conn).unwrap();

    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    let updated_at: i64 = conn
        .query_row("SELECT updated_at FROM memory WHERE content = 'old note'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(updated_at, 1_700_000_000);
}

#[test]
fn existing_history_survives_open() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("history.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        db::schema::init_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO conversations (id, title, created_at) VALUES ('keep', 'kept', 1)",
            [],
        )
        .unwrap();
    }

    let conn = db::open_database(&db_path).unwrap();
    let title: String = conn
        .query_row("SELECT title FROM conversations WHERE id = 'keep'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "kept");
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}
