//! wpgraph-core: WordPress vulnerability graph sync engine
//!
//! Synchronizes WordPress core versions, plugins, and their security
//! vulnerabilities from the WPScan API and wordpress.org into a Neo4j
//! property graph, and materializes plugin/core-version compatibility
//! edges from loosely-structured version requirement strings.

pub mod directory;
pub mod graph;
pub mod sync;
pub mod version;
