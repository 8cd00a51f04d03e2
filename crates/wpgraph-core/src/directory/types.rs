//! Wire records consumed from the upstream directories

use serde::{Deserialize, Deserializer};

/// A WPScan security vulnerability record.
///
/// Every field except the id is optional in practice; the record is
/// normalized (defaults, flattening of the nested groups) at plan-build
/// time, not at decode time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VulnerabilityRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub vuln_type: Option<String>,
    #[serde(default)]
    pub references: Option<References>,
    #[serde(default)]
    pub cvss: Option<Cvss>,
    pub verified: Option<bool>,
    pub fixed_in: Option<String>,
    pub introduced_in: Option<String>,
    #[serde(default)]
    pub closed: Option<Closed>,
}

/// External references attached to a vulnerability
#[derive(Debug, Clone, Default, Deserialize)]
pub struct References {
    #[serde(default)]
    pub url: Option<Vec<String>>,
    #[serde(default)]
    pub cve: Option<Vec<String>>,
}

/// CVSS scoring attached to a vulnerability
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cvss {
    pub score: Option<f64>,
    pub vector: Option<String>,
    pub severity: Option<String>,
}

/// Closure details for withdrawn/closed vulnerabilities
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Closed {
    pub closed_reason: Option<String>,
}

/// WPScan's record for one WordPress core version
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionDetails {
    pub release_date: Option<String>,
    pub changelog_url: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

/// WPScan's record for one plugin
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginDetails {
    pub latest_version: Option<String>,
    pub last_updated: Option<String>,
    pub popular: Option<bool>,
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

/// One entry of the wordpress.org bulk plugin listing.
///
/// Only the fields the compatibility recompute consumes are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginListing {
    pub slug: String,
    #[serde(default, deserialize_with = "string_or_false")]
    pub requires: Option<String>,
    #[serde(default, deserialize_with = "string_or_false")]
    pub tested: Option<String>,
}

/// wordpress.org reports unset version requirements as the JSON literal
/// `false` rather than null; accept both.
fn string_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFalse {
        Str(String),
        Flag(bool),
    }

    match Option::<StringOrFalse>::deserialize(deserializer)? {
        Some(StringOrFalse::Str(s)) => Ok(Some(s)),
        Some(StringOrFalse::Flag(_)) | None => Ok(None),
    }
}
