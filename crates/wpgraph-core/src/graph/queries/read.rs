//! Read-only query operations for Neo4j

use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;

/// Graph statistics
#[derive(Debug, Default, Clone)]
pub struct GraphStats {
    pub wordpress_versions: i64,
    pub plugins: i64,
    pub vulnerabilities: i64,
    pub has_vulnerability: i64,
    pub is_compatible: i64,
}

impl Neo4jClient {
    /// Execute a raw Cypher query and return the number of rows returned
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn execute_raw(&self, cypher: &str) -> Result<usize, Neo4jError> {
        let query = Query::new(cypher.to_string());
        let mut result = self.graph().execute(query).await?;
        let mut count = 0;

        while let Some(_row) = result.next().await? {
            count += 1;
        }

        Ok(count)
    }

    /// Get graph statistics
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn stats(&self) -> Result<GraphStats, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (n)
            WITH labels(n)[0] as label, count(n) as cnt
            RETURN label, cnt
            ORDER BY label
            "#
            .to_string(),
        );

        let mut result = self.graph().execute(query).await?;
        let mut stats = GraphStats::default();

        while let Some(row) = result.next().await? {
            let label: String = row.get("label").unwrap_or_default();
            let count: i64 = row.get("cnt").unwrap_or(0);

            match label.as_str() {
                "WordPressVersion" => stats.wordpress_versions = count,
                "Plugin" => stats.plugins = count,
                "Vulnerability" => stats.vulnerabilities = count,
                _ => {}
            }
        }

        // Relationship counts
        let rel_query = Query::new(
            r#"
            MATCH ()-[r]->()
            WITH type(r) as rel_type, count(r) as cnt
            RETURN rel_type, cnt
            ORDER BY cnt DESC
            "#
            .to_string(),
        );

        let mut rel_result = self.graph().execute(rel_query).await?;
        while let Some(row) = rel_result.next().await? {
            let rel_type: String = row.get("rel_type").unwrap_or_default();
            let count: i64 = row.get("cnt").unwrap_or(0);

            match rel_type.as_str() {
                "HAS_VULNERABILITY" => stats.has_vulnerability = count,
                "IS_COMPATIBLE" => stats.is_compatible = count,
                _ => {}
            }
        }

        Ok(stats)
    }
}
