//! `items` table definition.
//!
//! The DDL is idempotent (`IF NOT EXISTS`) so existing database files written by
//! earlier releases open unchanged. There is no migration tracking.

use rusqlite::Connection;

/// Name of the only table owned by the store.
pub const ITEMS_TABLE: &str = "items";

/// Column names in declaration order.
pub const ITEMS_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "part_number",
    "nsn",
    "serial_number",
    "quantity",
    "created_at",
];

const ITEMS_SCHEMA_SQL: &str = include_str!("items.sql");

/// Creates the `items` table when it does not exist yet.
pub fn ensure_items_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(ITEMS_SCHEMA_SQL)
}
