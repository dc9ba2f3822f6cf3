//! Initiative catalog domain model.
//!
//! # Responsibility
//! - Define the record shape and the fixed required-field set.
//!
//! # Invariants
//! - Records are read-only once loaded.
//! - Records are independent; list order only matters for display and
//!   diagnostic indices.

pub mod initiative;
