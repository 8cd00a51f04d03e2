//! Stats command: node and edge counts for the vulnerability graph

use anyhow::Result;
use tracing::info;
use wpgraph_core::graph::neo4j::{Neo4jClient, Neo4jConfig};

/// Run the stats command
///
/// # Errors
/// Returns an error if the connection or query fails.
pub async fn run(neo4j_uri: &str, neo4j_user: &str, neo4j_password: &str) -> Result<()> {
    let config = Neo4jConfig::new(neo4j_uri, neo4j_user, neo4j_password);
    let client = Neo4jClient::connect(&config).await?;

    info!("Fetching graph statistics...");
    let stats = client.stats().await?;

    println!("\nGraph statistics:");
    println!("{}", "-".repeat(40));
    println!("{:<28} {}", "WordPress versions", stats.wordpress_versions);
    println!("{:<28} {}", "Plugins", stats.plugins);
    println!("{:<28} {}", "Vulnerabilities", stats.vulnerabilities);
    println!("{:<28} {}", "HAS_VULNERABILITY edges", stats.has_vulnerability);
    println!("{:<28} {}", "IS_COMPATIBLE edges", stats.is_compatible);

    Ok(())
}
