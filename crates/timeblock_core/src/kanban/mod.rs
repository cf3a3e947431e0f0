//! Kanban board projection of note-service tasks.
//!
//! # Responsibility
//! - Bucket tasks into standard or week-mode columns.
//! - Plan the service update behind a drag-and-drop between columns.
//!
//! # See also
//! - `model::task` for provenance and effective-date rules.

pub mod distribute;
pub mod drop;
pub mod window;
