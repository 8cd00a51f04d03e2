//! Compatibility-edge Neo4j queries
//!
//! The version encoding embedded in these queries
//! (`major * 10000 + minor * 100 + patch` over the three dot-separated
//! components of the node's own identity string) must stay identical to
//! `crate::version::encode`, so that row-at-a-time inserts and the bulk
//! recompute agree on which versions fall in a range.

use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;
use crate::version::CompatRange;

impl Neo4jClient {
    /// Merge `IS_COMPATIBLE {compatible: true}` edges from a plugin to
    /// every core version whose encoded integer falls in the range.
    ///
    /// Additive-only: edges for pairs that no longer qualify are left in
    /// place. A missing plugin node matches zero rows and creates
    /// nothing.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn merge_compatibility_edges_in_range(
        &self,
        slug: &str,
        range: CompatRange,
    ) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (p:Plugin {slug: $slug})
            MATCH (wp:WordPressVersion)
            WITH p, wp,
              (toInteger(split(wp.version, '.')[0]) * 10000 +
               toInteger(split(wp.version, '.')[1]) * 100 +
               toInteger(split(wp.version, '.')[2])) AS wp_int
            WHERE wp_int >= $lower_int AND wp_int <= $upper_int
            MERGE (p)-[r:IS_COMPATIBLE]->(wp)
            SET r.compatible = true
            "#
            .to_string(),
        )
        .param("slug", slug)
        .param("lower_int", range.lower)
        .param("upper_int", range.upper);

        self.graph().run(query).await?;
        Ok(())
    }

    /// Version identity strings whose encoded integer falls in the
    /// range, ascending
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn match_versions_in_range(
        &self,
        range: CompatRange,
    ) -> Result<Vec<String>, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (wp:WordPressVersion)
            WITH wp,
              (toInteger(split(wp.version, '.')[0]) * 10000 +
               toInteger(split(wp.version, '.')[1]) * 100 +
               toInteger(split(wp.version, '.')[2])) AS wp_int
            WHERE wp_int >= $lower_int AND wp_int <= $upper_int
            RETURN wp.version as version
            ORDER BY wp_int
            "#
            .to_string(),
        )
        .param("lower_int", range.lower)
        .param("upper_int", range.upper);

        let mut result = self.graph().execute(query).await?;
        let mut versions = Vec::new();

        while let Some(row) = result.next().await? {
            versions.push(row.get("version").unwrap_or_default());
        }

        Ok(versions)
    }
}
