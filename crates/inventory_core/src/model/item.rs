//! Item domain model.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by the store and never change.
//! - `name`, `part_number`, `nsn` and `serial_number` are non-empty when
//!   written. Callers check this with [`ItemFields::validate`]; the store does
//!   not re-check.
//! - `quantity` is zero or positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier (`items.id`).
pub type ItemId = i64;

/// Persisted inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub part_number: String,
    /// NATO stock number.
    pub nsn: String,
    pub serial_number: String,
    pub quantity: i64,
    /// SQLite `datetime('now')` text at insert, e.g. `2024-05-01 13:45:12` (UTC).
    pub created_at: String,
}

impl Item {
    /// Returns the mutable part of this record.
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            part_number: self.part_number.clone(),
            nsn: self.nsn.clone(),
            serial_number: self.serial_number.clone(),
            quantity: self.quantity,
        }
    }
}

/// Write payload for insert and update: an `Item` without `id`/`created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub part_number: String,
    pub nsn: String,
    pub serial_number: String,
    pub quantity: i64,
}

impl ItemFields {
    pub fn new(
        name: impl Into<String>,
        part_number: impl Into<String>,
        nsn: impl Into<String>,
        serial_number: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            part_number: part_number.into(),
            nsn: nsn.into(),
            serial_number: serial_number.into(),
            quantity,
        }
    }

    /// Checks the write preconditions.
    ///
    /// Whitespace-only text counts as non-empty.
    ///
    /// # Errors
    /// - `EmptyField` naming the first empty text field in declaration order.
    /// - `NegativeQuantity` when `quantity < 0`.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        let text_fields = [
            ("name", &self.name),
            ("part_number", &self.part_number),
            ("nsn", &self.nsn),
            ("serial_number", &self.serial_number),
        ];
        if let Some((field, _)) = text_fields.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(ItemValidationError::EmptyField(field));
        }

        if self.quantity < 0 {
            return Err(ItemValidationError::NegativeQuantity(self.quantity));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyField(&'static str),
    NegativeQuantity(i64),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::NegativeQuantity(value) => {
                write!(f, "`quantity` must be zero or positive, got {value}")
            }
        }
    }
}

impl Error for ItemValidationError {}
