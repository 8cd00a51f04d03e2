//! Sync command: populate the vulnerability graph from the upstreams
//!
//! This module runs a 3-phase sync:
//! 1. Phase 1: Discover vulnerable plugin slugs, sync plugin records
//! 2. Phase 2: Sync WordPress core versions and their vulnerabilities
//! 3. Phase 3: Recompute plugin/core-version compatibility edges

mod phase1;
mod phase2;
mod phase3;

#[cfg(test)]
mod tests;

use anyhow::Result;
use tracing::info;
use wpgraph_core::directory::{
    LiveDirectory, PluginDirectory, SlugDiscovery, VersionDirectory, WordPressOrgClient,
    WpscanClient,
};
use wpgraph_core::graph::neo4j::{Neo4jClient, Neo4jConfig};
use wpgraph_core::graph::store::GraphStore;

pub use phase1::Phase1Result;
pub use phase2::Phase2Result;
pub use phase3::Phase3Result;

/// Run the sync command
///
/// # Errors
/// Returns an error if Neo4j is unreachable or a store write fails;
/// upstream failures degrade to per-item skips instead.
pub async fn run(
    neo4j_uri: &str,
    neo4j_user: &str,
    neo4j_password: &str,
    wpscan_token: &str,
) -> Result<()> {
    let client = connect_neo4j(neo4j_uri, neo4j_user, neo4j_password).await?;

    let wpscan = WpscanClient::new(wpscan_token)?;
    let org = WordPressOrgClient::new()?;
    let directory = LiveDirectory::new(wpscan, org);

    execute_sync(&client, &directory).await
}

/// Execute the sync workflow against an already-connected store
pub(crate) async fn execute_sync<S, D>(store: &S, directory: &D) -> Result<()>
where
    S: GraphStore + Sync,
    D: VersionDirectory + PluginDirectory + SlugDiscovery + Sync,
{
    let phase1 = phase1::run(store, directory).await?;
    let phase2 = phase2::run(store, directory).await?;
    let phase3 = phase3::run(store, directory).await?;

    info!("{}", summary_line(&phase1, &phase2, &phase3));
    Ok(())
}

fn summary_line(phase1: &Phase1Result, phase2: &Phase2Result, phase3: &Phase3Result) -> String {
    format!(
        "✓ Sync completed: {} new plugins ({} present, {} failed), {} new versions ({} present, {} failed), {} plugins compatibility-checked",
        phase1.report.inserted,
        phase1.report.already_present,
        phase1.report.failed,
        phase2.report.inserted,
        phase2.report.already_present,
        phase2.report.failed,
        phase3.report.plugins_processed,
    )
}

async fn connect_neo4j(uri: &str, user: &str, password: &str) -> Result<Neo4jClient> {
    let config = Neo4jConfig::new(uri, user, password);
    Ok(Neo4jClient::connect(&config).await?)
}
