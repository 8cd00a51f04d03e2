//! Phase 1: Discover vulnerable plugin slugs and sync plugin records

use anyhow::Result;
use tracing::{info, warn};
use wpgraph_core::directory::{PluginDirectory, SlugDiscovery};
use wpgraph_core::graph::store::GraphStore;
use wpgraph_core::sync::{SyncReport, Syncer};

/// Results from Phase 1
#[derive(Debug, Default)]
pub struct Phase1Result {
    pub report: SyncReport,
}

/// Run Phase 1: sync every known-vulnerable plugin
pub async fn run<S, D>(store: &S, directory: &D) -> Result<Phase1Result>
where
    S: GraphStore + Sync,
    D: PluginDirectory + SlugDiscovery + Sync,
{
    info!("Phase 1: Syncing vulnerable plugins...");

    let slugs = match directory.list_known_vulnerable_plugin_slugs().await {
        Ok(slugs) => slugs,
        Err(e) => {
            warn!("Slug discovery unavailable, skipping plugin sync: {}", e);
            return Ok(Phase1Result::default());
        }
    };
    info!("Discovered {} vulnerable plugin slugs", slugs.len());

    let report = Syncer::new(store).sync_plugins(directory, slugs).await?;
    info!(
        "Phase 1 done: {} inserted, {} already present, {} failed",
        report.inserted, report.already_present, report.failed
    );

    Ok(Phase1Result { report })
}
