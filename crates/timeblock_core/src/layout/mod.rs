//! Timeline layout helpers consumed by presentation code.

pub mod overlap;
