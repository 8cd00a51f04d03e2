//! Vulnerability-related Neo4j queries

use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;
use crate::graph::plan::UpsertPlan;

impl Neo4jClient {
    /// Check whether a vulnerability node exists
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn vulnerability_exists(&self, id: &str) -> Result<bool, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (v:Vulnerability {id: $id})
            RETURN v.id as id
            LIMIT 1
            "#
            .to_string(),
        )
        .param("id", id);

        let mut result = self.graph().execute(query).await?;
        Ok(result.next().await?.is_some())
    }

    /// Locate-or-create a vulnerability node and overwrite the supplied
    /// attributes. Absent attributes never reach the query, so no null
    /// is ever stored.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert_vulnerability(&self, plan: &UpsertPlan) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MERGE (v:Vulnerability {id: $id})
            SET v += $props
            "#
            .to_string(),
        )
        .param("id", plan.key())
        .param("props", plan.bolt_props());

        self.graph().run(query).await?;
        Ok(())
    }
}
