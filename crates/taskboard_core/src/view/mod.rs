//! Read-side projections for the dashboard.
//!
//! # Responsibility
//! - Filter and sort the task list for display.
//! - Project records into card and select-option view models.
//!
//! # Invariants
//! - Everything here is pure and recomputed per render; nothing is cached.

pub mod cards;
pub mod pipeline;
