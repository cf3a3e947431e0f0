//! Domain model for timeblocks, tasks and note payloads.
//!
//! # Responsibility
//! - Define the parsed entities produced from note text.
//! - Define the external task and note-payload shapes consumed as input.
//!
//! # Invariants
//! - `original_text` / `markdown` is the single source of truth for what is
//!   persisted; every other field is a cache derived from it.
//! - Parsed entities are values: edits produce new values, never mutate.

pub mod block;
pub mod payload;
pub mod task;
