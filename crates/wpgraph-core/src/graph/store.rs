//! The store seam the sync orchestrator writes through
//!
//! Everything the orchestrator needs from persistence, as one async
//! trait: existence checks, planned upserts, and idempotent edge merges.
//! `Neo4jClient` is the production implementation; tests run against an
//! in-memory one.

use async_trait::async_trait;

use super::model::{NodeKind, NodeRef};
use super::neo4j::{Neo4jClient, Neo4jError};
use super::plan::UpsertPlan;
use crate::version::CompatRange;

#[async_trait]
pub trait GraphStore {
    /// Whether a node of this kind with this identity already exists
    async fn node_exists(&self, kind: NodeKind, key: &str) -> Result<bool, Neo4jError>;

    /// Locate-or-create the node and apply the plan's attributes under
    /// its merge policy. Idempotent.
    async fn upsert_node(&self, plan: &UpsertPlan) -> Result<(), Neo4jError>;

    /// Merge one `HAS_VULNERABILITY` edge per vulnerability id from the
    /// source node. A missing endpoint on either side silently creates
    /// nothing; repeats create no duplicates.
    async fn merge_vulnerability_edges(
        &self,
        source: &NodeRef,
        vulnerability_ids: &[String],
    ) -> Result<(), Neo4jError>;

    /// Merge `IS_COMPATIBLE {compatible: true}` edges from the plugin to
    /// every WordPressVersion whose encoded version falls in the range.
    async fn merge_compatibility_edges(
        &self,
        slug: &str,
        range: CompatRange,
    ) -> Result<(), Neo4jError>;

    /// Version identity strings whose encoded integer falls in the range
    async fn versions_in_range(&self, range: CompatRange) -> Result<Vec<String>, Neo4jError>;
}

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn node_exists(&self, kind: NodeKind, key: &str) -> Result<bool, Neo4jError> {
        match kind {
            NodeKind::WordPressVersion => self.version_exists(key).await,
            NodeKind::Plugin => self.plugin_exists(key).await,
            NodeKind::Vulnerability => self.vulnerability_exists(key).await,
        }
    }

    async fn upsert_node(&self, plan: &UpsertPlan) -> Result<(), Neo4jError> {
        match plan.kind() {
            NodeKind::WordPressVersion => self.upsert_wordpress_version(plan).await,
            NodeKind::Plugin => self.upsert_plugin(plan).await,
            NodeKind::Vulnerability => self.upsert_vulnerability(plan).await,
        }
    }

    async fn merge_vulnerability_edges(
        &self,
        source: &NodeRef,
        vulnerability_ids: &[String],
    ) -> Result<(), Neo4jError> {
        for id in vulnerability_ids {
            match source {
                NodeRef::Version(version) => {
                    self.merge_version_vulnerability(version, id).await?;
                }
                NodeRef::Plugin(slug) => {
                    self.merge_plugin_vulnerability(slug, id).await?;
                }
            }
        }
        Ok(())
    }

    async fn merge_compatibility_edges(
        &self,
        slug: &str,
        range: CompatRange,
    ) -> Result<(), Neo4jError> {
        self.merge_compatibility_edges_in_range(slug, range).await
    }

    async fn versions_in_range(&self, range: CompatRange) -> Result<Vec<String>, Neo4jError> {
        self.match_versions_in_range(range).await
    }
}
