//! WordPressVersion-related Neo4j queries

use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;
use crate::graph::plan::UpsertPlan;

impl Neo4jClient {
    /// Check whether a core version node exists
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn version_exists(&self, version: &str) -> Result<bool, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (wp:WordPressVersion {version: $version})
            RETURN wp.version as version
            LIMIT 1
            "#
            .to_string(),
        )
        .param("version", version);

        let mut result = self.graph().execute(query).await?;
        Ok(result.next().await?.is_some())
    }

    /// Locate-or-create a core version node and overwrite its attributes.
    ///
    /// The authoritative source always wins here: the node is reset to
    /// its identity first, so attributes absent from the record are
    /// dropped rather than left stale.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert_wordpress_version(&self, plan: &UpsertPlan) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MERGE (wp:WordPressVersion {version: $version})
            SET wp = {version: $version}
            SET wp += $props
            "#
            .to_string(),
        )
        .param("version", plan.key())
        .param("props", plan.bolt_props());

        self.graph().run(query).await?;
        Ok(())
    }

    /// Merge a `HAS_VULNERABILITY` edge from a core version.
    ///
    /// Both endpoints are matched first; if either is missing the query
    /// matches zero rows and creates nothing.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn merge_version_vulnerability(
        &self,
        version: &str,
        vulnerability_id: &str,
    ) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (wp:WordPressVersion {version: $version})
            MATCH (v:Vulnerability {id: $v_id})
            MERGE (wp)-[:HAS_VULNERABILITY]->(v)
            "#
            .to_string(),
        )
        .param("version", version)
        .param("v_id", vulnerability_id);

        self.graph().run(query).await?;
        Ok(())
    }
}
