//! Phase 2: Sync WordPress core versions and their vulnerabilities

use anyhow::Result;
use tracing::{info, warn};
use wpgraph_core::directory::VersionDirectory;
use wpgraph_core::graph::store::GraphStore;
use wpgraph_core::sync::{SyncReport, Syncer};

/// Results from Phase 2
#[derive(Debug, Default)]
pub struct Phase2Result {
    pub report: SyncReport,
}

/// Run Phase 2: sync every released core version
pub async fn run<S, D>(store: &S, directory: &D) -> Result<Phase2Result>
where
    S: GraphStore + Sync,
    D: VersionDirectory + Sync,
{
    info!("Phase 2: Syncing WordPress core versions...");

    let versions = match directory.list_all_versions().await {
        Ok(versions) => versions,
        Err(e) => {
            warn!("Release listing unavailable, skipping version sync: {}", e);
            return Ok(Phase2Result::default());
        }
    };
    info!("Release archive lists {} versions", versions.len());

    let report = Syncer::new(store).sync_versions(directory, versions).await?;
    info!(
        "Phase 2 done: {} inserted, {} already present, {} failed",
        report.inserted, report.already_present, report.failed
    );

    Ok(Phase2Result { report })
}
