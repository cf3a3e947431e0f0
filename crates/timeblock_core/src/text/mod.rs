//! Line-level text handling for note markup.
//!
//! # Responsibility
//! - Strip and re-emit the optional markup around a note line (bullet,
//!   checkbox, highlight wrapper).
//! - Recognize time-range expressions and format decimal hours back to text.
//! - Rewrite only the time or title substring of an existing line.
//!
//! # Invariants
//! - Every function here is pure; none of them allocate shared state.
//! - Recognition never fails loudly: unrecognized text yields `None`.

pub mod markup;
pub mod mutate;
pub mod time;
