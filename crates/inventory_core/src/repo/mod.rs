//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite statements from service orchestration.
//!
//! # Invariants
//! - Repositories never log and never retry; every failure is returned typed.
//! - Update/delete report `NotFound` when no row was affected.

pub mod item_repo;
