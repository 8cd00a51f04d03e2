//! Conversion from upstream wire records to upsert plans

use super::model::NodeKind;
use super::plan::{PropValue, UpsertPlan};
use crate::directory::types::{PluginDetails, VersionDetails, VulnerabilityRecord};

/// Identity assigned to vulnerability records the source ships without an
/// id. Distinct id-less records therefore collide into a single node; the
/// upstream data behaves the same way.
pub const UNKNOWN_VULNERABILITY_ID: &str = "unknown";

/// Title stored when the source omits one
pub const NO_TITLE: &str = "No title available";

/// The identity a vulnerability record resolves to
#[must_use]
pub fn vulnerability_id(record: &VulnerabilityRecord) -> String {
    record
        .id
        .clone()
        .unwrap_or_else(|| UNKNOWN_VULNERABILITY_ID.to_string())
}

/// Plan the upsert of a WordPressVersion node (always-overwrite)
#[must_use]
pub fn version_plan(version: &str, details: &VersionDetails) -> UpsertPlan {
    UpsertPlan::new(NodeKind::WordPressVersion, version)
        .attr("release_date", details.release_date.clone().map(PropValue::Str))
        .attr("changelog_url", details.changelog_url.clone().map(PropValue::Str))
        .attr("status", details.status.clone().map(PropValue::Str))
}

/// Plan the upsert of a plugin's WPScan-sourced fields (merge-if-present).
///
/// The wordpress.org descriptive fields (name, author, ratings, ...) are
/// deliberately not written here; merge-if-present keeps anything a later
/// population puts there intact.
#[must_use]
pub fn plugin_wpscan_plan(slug: &str, details: &PluginDetails) -> UpsertPlan {
    UpsertPlan::new(NodeKind::Plugin, slug)
        .attr(
            "latest_version_wpscan",
            details.latest_version.clone().map(PropValue::Str),
        )
        .attr(
            "last_updated_wpscan",
            details.last_updated.clone().map(PropValue::Str),
        )
        .attr("popular_wpscan", details.popular.map(PropValue::Bool))
}

/// Plan the upsert of a Vulnerability node (overwrite-if-present).
///
/// The nested reference/cvss/closure groups are flattened onto the node;
/// absent attributes are omitted from the write entirely.
#[must_use]
pub fn vulnerability_plan(record: &VulnerabilityRecord) -> UpsertPlan {
    let title = record
        .title
        .clone()
        .unwrap_or_else(|| NO_TITLE.to_string());

    let (url, cve) = match &record.references {
        Some(refs) => (refs.url.clone(), refs.cve.clone()),
        None => (None, None),
    };
    let (score, vector, severity) = match &record.cvss {
        Some(cvss) => (cvss.score, cvss.vector.clone(), cvss.severity.clone()),
        None => (None, None, None),
    };
    let closed_reason = record
        .closed
        .as_ref()
        .and_then(|c| c.closed_reason.clone());

    UpsertPlan::new(NodeKind::Vulnerability, vulnerability_id(record))
        .attr("title", Some(PropValue::Str(title)))
        .attr("created_at", record.created_at.clone().map(PropValue::Str))
        .attr("updated_at", record.updated_at.clone().map(PropValue::Str))
        .attr(
            "published_date",
            record.published_date.clone().map(PropValue::Str),
        )
        .attr("description", record.description.clone().map(PropValue::Str))
        .attr("vuln_type", record.vuln_type.clone().map(PropValue::Str))
        .attr("url", url.map(PropValue::StrList))
        .attr("cve", cve.map(PropValue::StrList))
        .attr("score", score.map(PropValue::Float))
        .attr("vector", vector.map(PropValue::Str))
        .attr("severity", severity.map(PropValue::Str))
        .attr("verified", record.verified.map(PropValue::Bool))
        .attr("fixed_in", record.fixed_in.clone().map(PropValue::Str))
        .attr(
            "introduced_in",
            record.introduced_in.clone().map(PropValue::Str),
        )
        .attr("closed_reason", closed_reason.map(PropValue::Str))
}
