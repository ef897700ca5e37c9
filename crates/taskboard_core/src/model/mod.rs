//! Domain model for the project/task dashboard.
//!
//! # Responsibility
//! - Define canonical project and task records used by core business logic.
//! - Own calendar-date conversions shared by forms and cards.
//!
//! # Invariants
//! - Every entity is identified by a stable, collision resistant UUID.
//! - Tasks reference their project by id, never by display name.
//! - Per-project counters are not part of the stored model; they are derived
//!   from the task collection on read.

pub mod due_date;
pub mod project;
pub mod task;
