//! Inventory form use-case service.
//!
//! # Responsibility
//! - Validate raw form text before it reaches the store.
//! - Provide save/update/delete/search entry points for the form buttons.
//! - Provide status-bar text for every outcome.
//!
//! # Invariants
//! - The selected record id is owned by the UI session and passed in per call.
//! - Store errors are returned unchanged inside `ServiceError::Store`, tagged
//!   with the action that hit them.
//! - Log events carry ids and counts only, never field values.

use crate::db::{StoreError, StoreErrorKind};
use crate::model::item::{Item, ItemFields, ItemId, ItemValidationError};
use crate::repo::item_repo::ItemRepository;
use crate::search::filter::{parse_quantity, ItemFilter};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Form button that started a use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Update,
    Delete,
    Search,
    Get,
}

impl FormAction {
    /// Log event name.
    pub fn as_event(self) -> &'static str {
        match self {
            Self::Save => "item_save",
            Self::Update => "item_update",
            Self::Delete => "item_delete",
            Self::Search => "item_search",
            Self::Get => "item_get",
        }
    }
}

/// Service error for form use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// One of the four text fields is empty.
    MissingFields(FormAction),
    /// Quantity text is not a whole number, or is negative.
    InvalidQuantity(String),
    /// Update/delete was requested with no record selected.
    NoSelection(FormAction),
    Store {
        action: FormAction,
        source: StoreError,
    },
}

impl ServiceError {
    /// Status-bar text, worded for the action that failed.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::MissingFields(FormAction::Update) => {
                "Please fill out all fields before updating."
            }
            Self::MissingFields(_) => "Please fill out all fields before saving.",
            Self::InvalidQuantity(_) => "Quantity must be a whole number.",
            Self::NoSelection(FormAction::Delete) => "Select a record to delete.",
            Self::NoSelection(_) => "Select a record to update.",
            Self::Store { action, source } => match (action, source.kind()) {
                (FormAction::Save, StoreErrorKind::WriteFailed) => "Save failed.",
                (FormAction::Update, StoreErrorKind::WriteFailed) => "Update failed.",
                (FormAction::Delete, StoreErrorKind::WriteFailed) => "Delete failed.",
                _ => source.status_message(),
            },
        }
    }

    /// Underlying store error kind, if this error came from the store.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            Self::Store { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(action) => {
                write!(f, "{}: all text fields are required", action.as_event())
            }
            Self::InvalidQuantity(value) => write!(f, "invalid quantity `{value}`"),
            Self::NoSelection(action) => write!(f, "{}: no record selected", action.as_event()),
            Self::Store { action, source } => write!(f, "{}: {source}", action.as_event()),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Raw text of the five input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub name: String,
    pub part_number: String,
    pub nsn: String,
    pub serial_number: String,
    pub quantity: String,
}

impl ItemForm {
    /// Fills the form from a selected grid row.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            part_number: item.part_number.clone(),
            nsn: item.nsn.clone(),
            serial_number: item.serial_number.clone(),
            quantity: item.quantity.to_string(),
        }
    }

    /// Converts the form into a validated write payload.
    ///
    /// # Errors
    /// - `MissingFields(action)` when any text field is empty.
    /// - `InvalidQuantity` when quantity is empty, not a whole number, or negative.
    pub fn to_fields(&self, action: FormAction) -> ServiceResult<ItemFields> {
        let text_fields = [&self.name, &self.part_number, &self.nsn, &self.serial_number];
        if text_fields.iter().any(|value| value.is_empty()) {
            return Err(ServiceError::MissingFields(action));
        }

        let quantity = parse_quantity(&self.quantity)
            .ok_or_else(|| ServiceError::InvalidQuantity(self.quantity.clone()))?;
        let fields = ItemFields::new(
            self.name.as_str(),
            self.part_number.as_str(),
            self.nsn.as_str(),
            self.serial_number.as_str(),
            quantity,
        );

        fields.validate().map_err(|err| match err {
            ItemValidationError::EmptyField(_) => ServiceError::MissingFields(action),
            ItemValidationError::NegativeQuantity(_) => {
                ServiceError::InvalidQuantity(self.quantity.clone())
            }
        })?;

        Ok(fields)
    }

    /// Uses the form text as a search filter; empty fields are unconstrained.
    pub fn to_filter(&self) -> ItemFilter {
        ItemFilter {
            name: Some(self.name.clone()),
            part_number: Some(self.part_number.clone()),
            nsn: Some(self.nsn.clone()),
            serial_number: Some(self.serial_number.clone()),
            quantity: Some(self.quantity.clone()),
        }
    }
}

/// Form use-case facade over a repository implementation.
pub struct InventoryService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> InventoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves the form as a new record.
    pub fn save(&self, form: &ItemForm) -> ServiceResult<Item> {
        let action = FormAction::Save;
        let fields = reject_logged(action, form.to_fields(action))?;
        let item = store_logged(action, self.repo.insert(&fields))?;
        info!("event=item_save module=service status=ok id={}", item.id);
        Ok(item)
    }

    /// Overwrites the selected record with the form values.
    pub fn update(&self, selected: Option<ItemId>, form: &ItemForm) -> ServiceResult<()> {
        let action = FormAction::Update;
        let id = reject_logged(action, selected.ok_or(ServiceError::NoSelection(action)))?;
        let fields = reject_logged(action, form.to_fields(action))?;
        store_logged(action, self.repo.update(id, &fields))?;
        info!("event=item_update module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes the selected record. Confirmation is the caller's concern.
    pub fn delete(&self, selected: Option<ItemId>) -> ServiceResult<()> {
        let action = FormAction::Delete;
        let id = reject_logged(action, selected.ok_or(ServiceError::NoSelection(action)))?;
        store_logged(action, self.repo.delete(id))?;
        info!("event=item_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Runs a filtered search, newest first.
    pub fn search(&self, filter: &ItemFilter) -> ServiceResult<Vec<Item>> {
        let items = store_logged(FormAction::Search, self.repo.search(filter))?;
        debug!(
            "event=item_search module=service status=ok count={}",
            items.len()
        );
        Ok(items)
    }

    pub fn get(&self, id: ItemId) -> ServiceResult<Option<Item>> {
        store_logged(FormAction::Get, self.repo.get(id))
    }
}

pub fn saved_message() -> &'static str {
    "Record saved."
}

pub fn updated_message() -> &'static str {
    "Record updated."
}

pub fn deleted_message() -> &'static str {
    "Record deleted."
}

/// Shown when the user declines the delete confirmation.
pub fn delete_cancelled_message() -> &'static str {
    "Delete cancelled."
}

pub fn found_message(count: usize) -> String {
    format!("{count} record(s) found.")
}

fn reject_logged<T>(action: FormAction, result: ServiceResult<T>) -> ServiceResult<T> {
    if let Err(err) = &result {
        debug!(
            "event={} module=service status=rejected reason={:?}",
            action.as_event(),
            err.status_message()
        );
    }
    result
}

fn store_logged<T>(action: FormAction, result: Result<T, StoreError>) -> ServiceResult<T> {
    result.map_err(|source| {
        warn!(
            "event={} module=service status=error error_kind={:?}",
            action.as_event(),
            source.kind()
        );
        ServiceError::Store { action, source }
    })
}
