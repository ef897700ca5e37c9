//! Core use-case services.
//!
//! # Responsibility
//! - Apply create-time form rules (non-blank name/title, project selected).
//! - Orchestrate repository calls into use-case level APIs with read-back.
//! - Keep the dashboard and FFI layers decoupled from storage details.

pub mod project_service;
pub mod task_service;
