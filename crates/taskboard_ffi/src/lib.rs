//! Flutter bridge for Taskboard core.

pub mod api;
