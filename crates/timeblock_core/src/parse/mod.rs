//! Note parsing entry points.
//!
//! # Responsibility
//! - Classify single lines into timeblock entities.
//! - Walk nested note payloads and aggregate the classified entities.

pub mod classify;
pub mod walker;
