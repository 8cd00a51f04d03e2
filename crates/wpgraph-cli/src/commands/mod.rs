//! CLI commands

pub mod query;
pub mod stats;
pub mod sync;
pub mod versions;
