//! Directory module: upstream data-source collaborators
//!
//! The sync engine sees the outside world through three trait contracts:
//! the version directory (list + fetch core versions), the plugin
//! directory (bulk listing + per-slug fetch), and slug discovery (the set
//! of plugins known to carry vulnerabilities). The live implementations
//! talk to the WPScan API and wordpress.org over HTTP; tests substitute
//! stubs.

pub mod types;
pub mod wordpress_org;
pub mod wpscan;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

pub use types::{PluginDetails, PluginListing, VersionDetails, VulnerabilityRecord};
pub use wordpress_org::WordPressOrgClient;
pub use wpscan::WpscanClient;

/// Errors from an upstream directory.
///
/// All of these are recoverable for a sync run: the current item is
/// skipped and reported, and the run proceeds.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Source of WordPress core versions and their security records
#[async_trait]
pub trait VersionDirectory {
    /// All known core version strings, newest first.
    async fn list_all_versions(&self) -> Result<Vec<String>, DirectoryError>;

    /// The authoritative record for one version, or `None` if the source
    /// does not know it.
    async fn fetch_version(&self, version: &str)
        -> Result<Option<VersionDetails>, DirectoryError>;
}

/// Source of plugin listings and per-plugin security records
#[async_trait]
pub trait PluginDirectory {
    /// The full bulk plugin listing, with version requirements.
    async fn list_all_plugins(&self) -> Result<Vec<PluginListing>, DirectoryError>;

    /// The security record for one plugin, or `None` if the source does
    /// not know the slug.
    async fn fetch_plugin(&self, slug: &str) -> Result<Option<PluginDetails>, DirectoryError>;
}

/// Source of plugin slugs known to carry vulnerabilities
#[async_trait]
pub trait SlugDiscovery {
    /// Deduplicated set of known-vulnerable plugin slugs.
    async fn list_known_vulnerable_plugin_slugs(&self)
        -> Result<BTreeSet<String>, DirectoryError>;
}

/// The live collaborator set: WPScan for security records and slug
/// discovery, wordpress.org for version and plugin listings.
pub struct LiveDirectory {
    wpscan: WpscanClient,
    org: WordPressOrgClient,
}

impl LiveDirectory {
    #[must_use]
    pub fn new(wpscan: WpscanClient, org: WordPressOrgClient) -> Self {
        Self { wpscan, org }
    }
}

#[async_trait]
impl VersionDirectory for LiveDirectory {
    async fn list_all_versions(&self) -> Result<Vec<String>, DirectoryError> {
        self.org.list_all_versions().await
    }

    async fn fetch_version(
        &self,
        version: &str,
    ) -> Result<Option<VersionDetails>, DirectoryError> {
        self.wpscan.fetch_version(version).await
    }
}

#[async_trait]
impl PluginDirectory for LiveDirectory {
    async fn list_all_plugins(&self) -> Result<Vec<PluginListing>, DirectoryError> {
        self.org.list_all_plugins().await
    }

    async fn fetch_plugin(&self, slug: &str) -> Result<Option<PluginDetails>, DirectoryError> {
        self.wpscan.fetch_plugin(slug).await
    }
}

#[async_trait]
impl SlugDiscovery for LiveDirectory {
    async fn list_known_vulnerable_plugin_slugs(
        &self,
    ) -> Result<BTreeSet<String>, DirectoryError> {
        self.wpscan.list_vulnerable_slugs().await
    }
}
