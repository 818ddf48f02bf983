//! SQLite storage bootstrap and the store error taxonomy.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection used by the store.
//! - Ensure the `items` table exists before any read or write.
//! - Define the flat `StoreError` taxonomy shared by repository and query code.
//!
//! # Invariants
//! - The `items` table shape is a compatibility contract with existing files.
//! - Core code must not read/write items before schema bootstrap succeeds.

use crate::model::item::ItemId;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure returned by bootstrap, query building and CRUD calls.
#[derive(Debug)]
pub enum StoreError {
    /// Database file could not be opened or created.
    OpenFailed(rusqlite::Error),
    /// `items` table creation failed during bootstrap.
    SchemaFailed(rusqlite::Error),
    /// A filter value failed to parse. No statement was executed.
    InvalidFilter { field: &'static str, value: String },
    /// Update/delete targeted an id with no row.
    NotFound(ItemId),
    /// Backend rejected an insert/update/delete.
    WriteFailed(rusqlite::Error),
    /// Backend rejected a read statement.
    QueryFailed(rusqlite::Error),
}

/// Fieldless discriminant of [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    OpenFailed,
    SchemaFailed,
    InvalidFilter,
    NotFound,
    WriteFailed,
    QueryFailed,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::OpenFailed(_) => StoreErrorKind::OpenFailed,
            Self::SchemaFailed(_) => StoreErrorKind::SchemaFailed,
            Self::InvalidFilter { .. } => StoreErrorKind::InvalidFilter,
            Self::NotFound(_) => StoreErrorKind::NotFound,
            Self::WriteFailed(_) => StoreErrorKind::WriteFailed,
            Self::QueryFailed(_) => StoreErrorKind::QueryFailed,
        }
    }

    /// Human-readable status line for the form's status bar.
    pub fn status_message(&self) -> &'static str {
        self.kind().status_message()
    }
}

impl StoreErrorKind {
    /// Each kind maps to exactly one message, and no two kinds share one.
    pub fn status_message(self) -> &'static str {
        match self {
            Self::OpenFailed => "Failed to open the inventory database.",
            Self::SchemaFailed => "Failed to initialize the inventory database.",
            Self::InvalidFilter => "Search quantity must be a whole number.",
            Self::NotFound => "The selected record no longer exists.",
            Self::WriteFailed => "The record could not be written.",
            Self::QueryFailed => "Search failed.",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenFailed(err) => write!(f, "failed to open database: {err}"),
            Self::SchemaFailed(err) => write!(f, "failed to initialize items schema: {err}"),
            Self::InvalidFilter { field, value } => {
                write!(f, "invalid {field} filter `{value}`: expected a whole number")
            }
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::WriteFailed(err) => write!(f, "failed to write item: {err}"),
            Self::QueryFailed(err) => write!(f, "failed to query items: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OpenFailed(err)
            | Self::SchemaFailed(err)
            | Self::WriteFailed(err)
            | Self::QueryFailed(err) => Some(err),
            Self::InvalidFilter { .. } | Self::NotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, StoreErrorKind};
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_distinct_status_message() {
        let kinds = [
            StoreErrorKind::OpenFailed,
            StoreErrorKind::SchemaFailed,
            StoreErrorKind::InvalidFilter,
            StoreErrorKind::NotFound,
            StoreErrorKind::WriteFailed,
            StoreErrorKind::QueryFailed,
        ];
        let messages: HashSet<_> = kinds.iter().map(|kind| kind.status_message()).collect();
        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn invalid_filter_display_names_field_and_value() {
        let err = StoreError::InvalidFilter {
            field: "quantity",
            value: "abc".to_string(),
        };
        assert_eq!(err.kind(), StoreErrorKind::InvalidFilter);
        assert!(err.to_string().contains("quantity"));
        assert!(err.to_string().contains("`abc`"));
    }
}
