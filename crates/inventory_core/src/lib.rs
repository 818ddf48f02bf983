//! Core persistence and query logic for the Inventory desktop app.
//! This crate owns the `items` table and every rule about reading/writing it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{open_db, open_db_in_memory, StoreError, StoreErrorKind, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::item::{Item, ItemFields, ItemId, ItemValidationError};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use search::filter::{build_item_query, ItemFilter, ItemQuery};
pub use service::inventory_service::{
    delete_cancelled_message, deleted_message, found_message, saved_message, updated_message,
    FormAction, InventoryService, ItemForm, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
