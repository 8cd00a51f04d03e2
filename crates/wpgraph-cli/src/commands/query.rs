//! Query command: run a raw Cypher query against the graph

use anyhow::Result;
use tracing::info;
use wpgraph_core::graph::neo4j::{Neo4jClient, Neo4jConfig};

/// Run the query command
///
/// # Errors
/// Returns an error if the connection or query fails.
pub async fn run(
    cypher: &str,
    neo4j_uri: &str,
    neo4j_user: &str,
    neo4j_password: &str,
) -> Result<()> {
    let config = Neo4jConfig::new(neo4j_uri, neo4j_user, neo4j_password);
    let client = Neo4jClient::connect(&config).await?;

    info!("Executing query: {}", cypher);
    let rows = client.execute_raw(cypher).await?;

    println!("Query returned {rows} rows");
    Ok(())
}
