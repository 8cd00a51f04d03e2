//! WPScan API client and vulnerable-slug discovery

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tracing::warn;

use super::types::{PluginDetails, VersionDetails};
use super::DirectoryError;

/// Default base URL for the WPScan REST API
const DEFAULT_API_URL: &str = "https://wpscan.com/api/v3";

/// Default base URL for the wpscan.com plugin table (slug discovery)
const DEFAULT_WEB_URL: &str = "https://wpscan.com";

/// Bounded timeout for any single upstream request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the WPScan API and the wpscan.com plugin table
pub struct WpscanClient {
    client: reqwest::Client,
    api_url: String,
    web_url: String,
    token: String,
}

impl WpscanClient {
    /// Create a client against the production WPScan endpoints
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, DirectoryError> {
        Self::with_urls(token, DEFAULT_API_URL, DEFAULT_WEB_URL)
    }

    /// Create a client against custom base URLs
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_urls(
        token: impl Into<String>,
        api_url: impl Into<String>,
        web_url: impl Into<String>,
    ) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .user_agent("wpgraph")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            web_url: web_url.into(),
            token: token.into(),
        })
    }

    /// Fetch the authoritative record for one core version.
    ///
    /// The API responds with a map keyed by version string; the entry for
    /// the requested version is preferred, any sole entry accepted.
    ///
    /// # Errors
    /// Returns an error on transport failure or an unexpected status.
    pub async fn fetch_version(
        &self,
        version: &str,
    ) -> Result<Option<VersionDetails>, DirectoryError> {
        let url = format!("{}/wordpresses/{}", self.api_url, version);
        let Some(mut map) = self.fetch_keyed::<VersionDetails>(&url).await? else {
            return Ok(None);
        };

        if let Some(details) = map.remove(version) {
            return Ok(Some(details));
        }
        Ok(map.into_values().next())
    }

    /// Fetch the security record for one plugin slug.
    ///
    /// A response that does not contain the requested slug counts as
    /// unknown, not as an error.
    ///
    /// # Errors
    /// Returns an error on transport failure or an unexpected status.
    pub async fn fetch_plugin(
        &self,
        slug: &str,
    ) -> Result<Option<PluginDetails>, DirectoryError> {
        let url = format!("{}/plugins/{}", self.api_url, slug);
        let Some(mut map) = self.fetch_keyed::<PluginDetails>(&url).await? else {
            return Ok(None);
        };
        Ok(map.remove(slug))
    }

    async fn fetch_keyed<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Option<HashMap<String, T>>, DirectoryError> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Token token={}", self.token))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let map = response
            .json::<HashMap<String, T>>()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        Ok(Some(map))
    }

    /// Walk the paginated wpscan.com plugin table and collect every slug
    /// listed there, deduplicated.
    ///
    /// The table is partitioned by leading-character filter (`0-9`, then
    /// `a` through `z`); each filter's page count comes from its first
    /// page's pagination. A filter that fails to load is skipped, the
    /// remaining filters still contribute.
    ///
    /// # Errors
    /// Returns an error only if the HTTP client itself fails fatally;
    /// per-filter failures are logged and skipped.
    pub async fn list_vulnerable_slugs(&self) -> Result<BTreeSet<String>, DirectoryError> {
        let mut slugs = BTreeSet::new();

        let mut filters: Vec<String> = vec![String::new()];
        filters.extend(('a'..='z').map(|c| c.to_string()));

        for filter in &filters {
            let first = match self.fetch_table_page(filter, 1).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Skipping wpscan filter '{}': {}", filter, e);
                    continue;
                }
            };

            let last_page = max_page(&first);
            slugs.extend(extract_slugs(&first));

            for page in 2..=last_page {
                match self.fetch_table_page(filter, page).await {
                    Ok(html) => {
                        let found = extract_slugs(&html);
                        if found.is_empty() {
                            break;
                        }
                        slugs.extend(found);
                    }
                    Err(e) => {
                        warn!("Skipping wpscan filter '{}' page {}: {}", filter, page, e);
                        break;
                    }
                }
            }
        }

        Ok(slugs)
    }

    async fn fetch_table_page(&self, filter: &str, page: u32) -> Result<String, DirectoryError> {
        let url = format!("{}/plugins", self.web_url);
        let response = self
            .client
            .get(&url)
            .query(&[("page", page.to_string().as_str()), ("get", filter)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Extract plugin slugs from one page of the wpscan.com table
pub(super) fn extract_slugs(html: &str) -> Vec<String> {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    let re = SLUG_RE.get_or_init(|| {
        Regex::new(r#"(?s)vulnerabilities__table--slug[^>]*>\s*<a[^>]*>([^<]+)</a>"#)
            .unwrap_or_else(|_| unreachable!("static slug pattern"))
    });

    re.captures_iter(html)
        .filter_map(|c| {
            let slug = c.get(1)?.as_str().trim();
            (!slug.is_empty()).then(|| slug.to_string())
        })
        .collect()
}

/// Highest page number advertised in a table page's pagination block,
/// defaulting to 1 when there is no pagination
pub(super) fn max_page(html: &str) -> u32 {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    static PAGE_RE: OnceLock<Regex> = OnceLock::new();

    let block_re = BLOCK_RE.get_or_init(|| {
        Regex::new(r"(?s)vulnerabilities__pagination(.*?)</ul>")
            .unwrap_or_else(|_| unreachable!("static pagination pattern"))
    });
    let page_re = PAGE_RE
        .get_or_init(|| Regex::new(r">(\d+)<").unwrap_or_else(|_| unreachable!("static page pattern")));

    let Some(block) = block_re.captures(html).and_then(|c| c.get(1)) else {
        return 1;
    };

    page_re
        .captures_iter(block.as_str())
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(1)
}
