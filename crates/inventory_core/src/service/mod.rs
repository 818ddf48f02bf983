//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw form input into validated store calls.
//! - Keep UI layers decoupled from storage details.

pub mod inventory_service;
