//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered search over the `items` table.
//! - Map rows to `Item` values.
//!
//! # Invariants
//! - Input is not re-validated here; callers check `ItemFields::validate()`.
//! - `created_at` is written only by the column default on insert.
//! - Search filters are fully parsed before any statement is prepared.

use crate::db::{StoreError, StoreResult};
use crate::model::item::{Item, ItemFields, ItemId};
use crate::search::filter::{build_item_query, ItemFilter, ITEM_SELECT_SQL};
use rusqlite::{params, params_from_iter, Connection, Row};

/// Repository interface for item CRUD operations.
pub trait ItemRepository {
    /// Inserts one row and returns it with its assigned `id` and `created_at`.
    ///
    /// Every failure, including the read-back of the new row, is `WriteFailed`.
    fn insert(&self, fields: &ItemFields) -> StoreResult<Item>;
    /// Overwrites every mutable column of row `id`.
    fn update(&self, id: ItemId, fields: &ItemFields) -> StoreResult<()>;
    /// Hard-deletes row `id`.
    fn delete(&self, id: ItemId) -> StoreResult<()>;
    /// Returns matching rows, newest first.
    fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>>;
    fn get(&self, id: ItemId) -> StoreResult<Option<Item>>;
    fn count(&self) -> StoreResult<u64>;
}

/// SQLite-backed item repository over a borrowed, bootstrapped connection.
///
/// The connection must come from `db::open_db` or `db::open_db_in_memory`.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert(&self, fields: &ItemFields) -> StoreResult<Item> {
        self.conn
            .execute(
                "INSERT INTO items (
                    name,
                    part_number,
                    nsn,
                    serial_number,
                    quantity
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    fields.name.as_str(),
                    fields.part_number.as_str(),
                    fields.nsn.as_str(),
                    fields.serial_number.as_str(),
                    fields.quantity,
                ],
            )
            .map_err(StoreError::WriteFailed)?;

        // A failed read-back of the new row is a failed insert.
        self.conn
            .query_row(
                &format!("{ITEM_SELECT_SQL} WHERE id = ?1;"),
                [self.conn.last_insert_rowid()],
                parse_item_row,
            )
            .map_err(StoreError::WriteFailed)
    }

    fn update(&self, id: ItemId, fields: &ItemFields) -> StoreResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE items
                 SET
                    name = ?1,
                    part_number = ?2,
                    nsn = ?3,
                    serial_number = ?4,
                    quantity = ?5
                 WHERE id = ?6;",
                params![
                    fields.name.as_str(),
                    fields.part_number.as_str(),
                    fields.nsn.as_str(),
                    fields.serial_number.as_str(),
                    fields.quantity,
                    id,
                ],
            )
            .map_err(StoreError::WriteFailed)?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: ItemId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id])
            .map_err(StoreError::WriteFailed)?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        let query = build_item_query(filter)?;
        self.query_items(query.sql(), params_from_iter(query.params()))
            .map_err(StoreError::QueryFailed)
    }

    fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let items = self
            .query_items(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"), [id])
            .map_err(StoreError::QueryFailed)?;
        Ok(items.into_iter().next())
    }

    fn count(&self) -> StoreResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get::<_, i64>(0))
            .map_err(StoreError::QueryFailed)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl SqliteItemRepository<'_> {
    fn query_items(&self, sql: &str, params: impl rusqlite::Params) -> rusqlite::Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }
}

fn parse_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get("id")?,
        name: row.get("name")?,
        part_number: row.get("part_number")?,
        nsn: row.get("nsn")?,
        serial_number: row.get("serial_number")?,
        quantity: row.get("quantity")?,
        created_at: row.get("created_at")?,
    })
}
