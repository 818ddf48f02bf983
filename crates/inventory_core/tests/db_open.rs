use inventory_core::db::schema::{ITEMS_COLUMNS, ITEMS_TABLE};
use inventory_core::db::{open_db, open_db_in_memory};
use inventory_core::{ItemFields, ItemRepository, SqliteItemRepository, StoreErrorKind};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_items_table() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, ITEMS_TABLE);
    assert_eq!(column_names(&conn), ITEMS_COLUMNS);
}

#[test]
fn opening_same_database_twice_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    let conn_first = open_db(&path).unwrap();
    SqliteItemRepository::new(&conn_first)
        .insert(&ItemFields::new("Widget", "PN-1", "NSN-1", "SN-1", 3))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    let repo = SqliteItemRepository::new(&conn_second);
    assert_eq!(repo.count().unwrap(), 1);
    assert_eq!(column_names(&conn_second), ITEMS_COLUMNS);
}

#[test]
fn existing_file_with_items_table_is_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            part_number TEXT NOT NULL,
            nsn TEXT NOT NULL,
            serial_number TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        INSERT INTO items (name, part_number, nsn, serial_number, quantity, created_at)
        VALUES ('Legacy', 'PN-0', 'NSN-0', 'SN-0', 9, '2020-01-02 03:04:05');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let item = SqliteItemRepository::new(&conn).get(1).unwrap().unwrap();
    assert_eq!(item.name, "Legacy");
    assert_eq!(item.quantity, 9);
    assert_eq!(item.created_at, "2020-01-02 03:04:05");
}

#[test]
fn open_in_missing_directory_fails_with_open_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("inventory.db");

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::OpenFailed);
}

#[test]
fn open_non_database_file_fails_with_schema_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.db");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::SchemaFailed);
}

fn column_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(items);").unwrap();
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
