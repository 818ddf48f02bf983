//! Filtered item search.
//!
//! # Responsibility
//! - Turn a sparse `ItemFilter` into a parameterized `SELECT` over `items`.
//! - Reject unparsable filter values before any statement runs.

pub mod filter;
