//! Plugin-related Neo4j queries

use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;
use crate::graph::plan::UpsertPlan;

impl Neo4jClient {
    /// Check whether a plugin node exists
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn plugin_exists(&self, slug: &str) -> Result<bool, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (p:Plugin {slug: $slug})
            RETURN p.slug as slug
            LIMIT 1
            "#
            .to_string(),
        )
        .param("slug", slug);

        let mut result = self.graph().execute(query).await?;
        Ok(result.next().await?.is_some())
    }

    /// Locate-or-create a plugin node and merge its attributes.
    ///
    /// The props map only ever carries present values (merge-if-present
    /// policy), so stored attributes survive partial records.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert_plugin(&self, plan: &UpsertPlan) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MERGE (p:Plugin {slug: $slug})
            SET p += $props
            "#
            .to_string(),
        )
        .param("slug", plan.key())
        .param("props", plan.bolt_props());

        self.graph().run(query).await?;
        Ok(())
    }

    /// Merge a `HAS_VULNERABILITY` edge from a plugin.
    ///
    /// Zero rows match when either endpoint is missing; no edge, no
    /// error, no duplicates on repeat.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn merge_plugin_vulnerability(
        &self,
        slug: &str,
        vulnerability_id: &str,
    ) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (p:Plugin {slug: $slug})
            MATCH (v:Vulnerability {id: $v_id})
            MERGE (p)-[:HAS_VULNERABILITY]->(v)
            "#
            .to_string(),
        )
        .param("slug", slug)
        .param("v_id", vulnerability_id);

        self.graph().run(query).await?;
        Ok(())
    }
}
