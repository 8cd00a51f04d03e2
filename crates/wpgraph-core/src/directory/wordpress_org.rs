//! wordpress.org clients: bulk plugin listing and release history

use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::PluginListing;
use super::DirectoryError;
use crate::version::encode;

/// Default base URL for the wordpress.org plugin info API
const DEFAULT_API_URL: &str = "https://api.wordpress.org/plugins/info/1.2/";

/// Default URL of the release archive page
const DEFAULT_RELEASES_URL: &str = "https://wordpress.org/download/releases/";

/// Maximum page size the plugin info API allows
const PER_PAGE: u32 = 250;

/// Bounded timeout for any single upstream request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct QueryPluginsResponse {
    #[serde(default)]
    plugins: Vec<PluginListing>,
}

/// Client for the wordpress.org plugin API and release archive
pub struct WordPressOrgClient {
    client: reqwest::Client,
    api_url: String,
    releases_url: String,
}

impl WordPressOrgClient {
    /// Create a client against the production wordpress.org endpoints
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, DirectoryError> {
        Self::with_urls(DEFAULT_API_URL, DEFAULT_RELEASES_URL)
    }

    /// Create a client against custom base URLs
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_urls(
        api_url: impl Into<String>,
        releases_url: impl Into<String>,
    ) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .user_agent("wpgraph")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            releases_url: releases_url.into(),
        })
    }

    /// Page through `query_plugins` and accumulate every listing.
    ///
    /// Pagination stops at the first empty page; a mid-run page failure
    /// keeps whatever was accumulated so far, so a partial listing is
    /// still usable by the compatibility recompute.
    ///
    /// # Errors
    /// Returns an error if the very first page cannot be fetched.
    pub async fn list_all_plugins(&self) -> Result<Vec<PluginListing>, DirectoryError> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let batch = match self.fetch_listing_page(page).await {
                Ok(batch) => batch,
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    warn!("Plugin listing stopped at page {}: {}", page, e);
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }
            debug!("Fetched plugin listing page {} ({} entries)", page, batch.len());
            all.extend(batch);
            page += 1;
        }

        Ok(all)
    }

    async fn fetch_listing_page(&self, page: u32) -> Result<Vec<PluginListing>, DirectoryError> {
        let page_param = page.to_string();
        let per_page_param = PER_PAGE.to_string();
        let mut params = vec![
            ("action", "query_plugins"),
            ("request[page]", page_param.as_str()),
            ("request[per_page]", per_page_param.as_str()),
        ];
        // The API omits fields unless asked for them explicitly
        params.push(("request[fields][slug]", "true"));
        params.push(("request[fields][requires]", "true"));
        params.push(("request[fields][tested]", "true"));

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus {
                url: self.api_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<QueryPluginsResponse>()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        Ok(body.plugins)
    }

    /// Scrape the release archive and return every `x.y.z` version,
    /// deduplicated and newest first.
    ///
    /// # Errors
    /// Returns an error on transport failure or an unexpected status.
    pub async fn list_all_versions(&self) -> Result<Vec<String>, DirectoryError> {
        let response = self.client.get(&self.releases_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus {
                url: self.releases_url.clone(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(extract_versions(&html))
    }
}

/// Pull `x.y.z` version strings out of the release archive's version
/// cells, deduplicated, sorted newest first
pub(super) fn extract_versions(html: &str) -> Vec<String> {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();

    let cell_re = CELL_RE.get_or_init(|| {
        Regex::new(r"(?s)release-tables__cell-version[^>]*>(.*?)</th>")
            .unwrap_or_else(|_| unreachable!("static cell pattern"))
    });
    let version_re = VERSION_RE.get_or_init(|| {
        Regex::new(r"^\d+\.\d+\.\d+$").unwrap_or_else(|_| unreachable!("static version pattern"))
    });

    let mut seen = BTreeSet::new();
    for cell in cell_re.captures_iter(html) {
        let Some(inner) = cell.get(1) else { continue };
        let text = strip_tags(inner.as_str());
        let text = text.trim();
        if version_re.is_match(text) {
            seen.insert(text.to_string());
        }
    }

    let mut versions: Vec<String> = seen.into_iter().collect();
    versions.sort_by_key(|v| std::cmp::Reverse(encode(v)));
    versions
}

fn strip_tags(fragment: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let re = TAG_RE
        .get_or_init(|| Regex::new(r"<[^>]*>").unwrap_or_else(|_| unreachable!("static tag pattern")));
    re.replace_all(fragment, "").into_owned()
}
