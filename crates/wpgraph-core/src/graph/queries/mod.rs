//! Neo4j query modules organized by entity

mod compat;
mod plugin;
mod read;
mod version;
mod vulnerability;

// Re-export Neo4jClient for the impl blocks
pub(super) use super::neo4j::Neo4jClient;

// Re-export query result types
pub use read::GraphStats;
