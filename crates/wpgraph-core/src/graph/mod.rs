//! Graph module: data model and Neo4j storage
//!
//! Defines the node/edge model for the vulnerability graph, the upsert
//! planner with its per-entity merge policies, and the Neo4j client that
//! persists it all.

pub mod convert;
pub mod model;
pub mod neo4j;
pub mod plan;
pub mod queries;
pub mod store;
