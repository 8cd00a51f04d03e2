//! Phase 3: Recompute plugin/core-version compatibility edges

use anyhow::Result;
use tracing::{info, warn};
use wpgraph_core::directory::PluginDirectory;
use wpgraph_core::graph::store::GraphStore;
use wpgraph_core::sync::{CompatReport, Syncer};

/// Results from Phase 3
#[derive(Debug, Default)]
pub struct Phase3Result {
    pub report: CompatReport,
}

/// Run Phase 3: full compatibility re-scan over the bulk plugin listing
pub async fn run<S, D>(store: &S, directory: &D) -> Result<Phase3Result>
where
    S: GraphStore + Sync,
    D: PluginDirectory + Sync,
{
    info!("Phase 3: Recomputing compatibility edges...");

    let listings = match directory.list_all_plugins().await {
        Ok(listings) => listings,
        Err(e) => {
            warn!("Plugin listing unavailable, skipping recompute: {}", e);
            return Ok(Phase3Result::default());
        }
    };
    info!("Bulk listing carries {} plugins", listings.len());

    let report = Syncer::new(store).recompute_compatibility(&listings).await?;
    info!(
        "Phase 3 done: {} plugins compatibility-checked",
        report.plugins_processed
    );

    Ok(Phase3Result { report })
}
