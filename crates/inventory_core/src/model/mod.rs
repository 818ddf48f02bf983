//! Inventory domain model.
//!
//! # Responsibility
//! - Define the `Item` record and its write payload `ItemFields`.
//!
//! # Invariants
//! - Every item is identified by a store-assigned integer `ItemId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod item;
