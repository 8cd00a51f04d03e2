//! Sync module: incremental sync driver and compatibility recompute
//!
//! Two idempotent incremental sync procedures (core versions, plugins)
//! plus a bulk compatibility recompute. Candidate lists are shuffled
//! before the sequential loop purely to spread load on the upstream
//! sources; order never matters for correctness. Every write is an
//! idempotent merge, so re-running after a partial failure is the retry
//! mechanism.
//!
//! The recompute is additive-only: it merges edges for pairs that newly
//! qualify but never removes ones that no longer do after an upstream
//! requires/tested change.

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::{debug, info, warn};

use crate::directory::types::{PluginDetails, PluginListing, VersionDetails};
use crate::directory::{PluginDirectory, VersionDirectory};
use crate::graph::convert;
use crate::graph::model::{NodeKind, NodeRef};
use crate::graph::neo4j::Neo4jError;
use crate::graph::store::GraphStore;
use crate::version::CompatRange;

/// Per-item outcome counts for one incremental sync pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Entities fetched and newly inserted
    pub inserted: usize,
    /// Entities already in the store, skipped without a fetch
    pub already_present: usize,
    /// Entities whose upstream fetch failed or came back empty
    pub failed: usize,
}

/// Outcome of one compatibility recompute pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompatReport {
    /// Plugin listings whose range was recomputed and materialized
    pub plugins_processed: usize,
}

/// Top-level sync driver. Holds a borrowed store handle; the upstream
/// collaborators are injected per call.
pub struct Syncer<'a, S> {
    store: &'a S,
}

impl<'a, S: GraphStore + Sync> Syncer<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Incrementally sync WordPress core versions.
    ///
    /// For each candidate: skip if the node exists, otherwise fetch the
    /// authoritative record and upsert the version node, its
    /// vulnerability nodes, and the connecting edges. Fetch failures are
    /// per-item: reported, skipped, never retried here.
    ///
    /// # Errors
    /// Returns an error only on store failure; upstream failures are
    /// absorbed into the report.
    pub async fn sync_versions<D>(
        &self,
        directory: &D,
        mut candidates: Vec<String>,
    ) -> Result<SyncReport, Neo4jError>
    where
        D: VersionDirectory + Sync,
    {
        candidates.shuffle(&mut thread_rng());

        let mut report = SyncReport::default();
        for version in &candidates {
            if self
                .store
                .node_exists(NodeKind::WordPressVersion, version)
                .await?
            {
                debug!("Version {} already present, skipping", version);
                report.already_present += 1;
                continue;
            }

            match directory.fetch_version(version).await {
                Ok(Some(details)) => {
                    self.insert_version(version, &details).await?;
                    info!("Inserted version {}", version);
                    report.inserted += 1;
                }
                Ok(None) => {
                    warn!("Version {} not found upstream, skipping", version);
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("Failed to fetch version {}: {}", version, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Incrementally sync plugins by slug.
    ///
    /// Mirrors the version sync; only the WPScan-sourced plugin fields
    /// are written at this stage.
    ///
    /// # Errors
    /// Returns an error only on store failure.
    pub async fn sync_plugins<D>(
        &self,
        directory: &D,
        slugs: BTreeSet<String>,
    ) -> Result<SyncReport, Neo4jError>
    where
        D: PluginDirectory + Sync,
    {
        let mut candidates: Vec<String> = slugs.into_iter().collect();
        candidates.shuffle(&mut thread_rng());

        let mut report = SyncReport::default();
        for slug in &candidates {
            if self.store.node_exists(NodeKind::Plugin, slug).await? {
                debug!("Plugin '{}' already present, skipping", slug);
                report.already_present += 1;
                continue;
            }

            match directory.fetch_plugin(slug).await {
                Ok(Some(details)) => {
                    self.insert_plugin(slug, &details).await?;
                    info!("Inserted plugin '{}'", slug);
                    report.inserted += 1;
                }
                Ok(None) => {
                    warn!("Plugin '{}' not found upstream, skipping", slug);
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("Failed to fetch plugin '{}': {}", slug, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Recompute every listed plugin's compatibility range and merge
    /// `IS_COMPATIBLE` edges against all in-range core versions.
    ///
    /// Full re-scan over the supplied bulk listing, independent of the
    /// incremental syncs; listings whose plugin node does not exist
    /// merge zero edges.
    ///
    /// # Errors
    /// Returns an error only on store failure.
    pub async fn recompute_compatibility(
        &self,
        listings: &[PluginListing],
    ) -> Result<CompatReport, Neo4jError> {
        let mut report = CompatReport::default();

        for listing in listings {
            let range =
                CompatRange::resolve(listing.requires.as_deref(), listing.tested.as_deref());
            debug!(
                "Compatibility for '{}': [{}, {}]",
                listing.slug, range.lower, range.upper
            );
            self.store
                .merge_compatibility_edges(&listing.slug, range)
                .await?;
            report.plugins_processed += 1;
        }

        Ok(report)
    }

    async fn insert_version(
        &self,
        version: &str,
        details: &VersionDetails,
    ) -> Result<(), Neo4jError> {
        self.store
            .upsert_node(&convert::version_plan(version, details))
            .await?;

        let ids = self.insert_vulnerabilities(&details.vulnerabilities).await?;
        self.store
            .merge_vulnerability_edges(&NodeRef::Version(version.to_string()), &ids)
            .await
    }

    async fn insert_plugin(&self, slug: &str, details: &PluginDetails) -> Result<(), Neo4jError> {
        self.store
            .upsert_node(&convert::plugin_wpscan_plan(slug, details))
            .await?;

        let ids = self.insert_vulnerabilities(&details.vulnerabilities).await?;
        self.store
            .merge_vulnerability_edges(&NodeRef::Plugin(slug.to_string()), &ids)
            .await
    }

    async fn insert_vulnerabilities(
        &self,
        records: &[crate::directory::VulnerabilityRecord],
    ) -> Result<Vec<String>, Neo4jError> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            self.store
                .upsert_node(&convert::vulnerability_plan(record))
                .await?;
            ids.push(convert::vulnerability_id(record));
        }
        Ok(ids)
    }
}
