//! Versions command: list stored core versions inside a requirement range


use anyhow::Result;
use tracing::info;
use wpgraph_core::graph::neo4j::{Neo4jClient, Neo4jConfig};
use wpgraph_core::graph::store::GraphStore;
use wpgraph_core::version::CompatRange;

/// Run the versions command
///
/// Resolves a plugin-style `requires`/`tested` pair to a compatibility
/// range and lists every stored core version that falls inside it.
///
/// # Errors
/// Returns an error if the connection or query fails.
pub async fn run(
    requires: Option<&str>,
    tested: Option<&str>,
    neo4j_uri: &str,
    neo4j_user: &str,
    neo4j_password: &str,
) -> Result<()> {
    let config = Neo4jConfig::new(neo4j_uri, neo4j_user, neo4j_password);
    let client = Neo4jClient::connect(&config).await?;

    let range = CompatRange::resolve(requires, tested);
    info!(
        "Resolved compatibility range [{}, {}]",
        range.lower, range.upper
    );

    let versions = client.versions_in_range(range).await?;
    print!("{}", render(range, &versions));

    Ok(())
}

fn render(range: CompatRange, versions: &[String]) -> String {
    let mut out = format!(
        "{} stored versions in range [{}, {}]\n",
        versions.len(),
        range.lower,
        range.upper
    );
    for version in versions {
        out.push_str(version);
        out.push('\n');
    }
    out
}
