//! Tests for wire-record deserialization

#![allow(clippy::unwrap_used)]

use crate::directory::types::{PluginListing, VulnerabilityRecord};

#[test]
fn test_listing_requires_accepts_string_or_false() {
    let with_string: PluginListing =
        serde_json::from_str(r#"{"slug": "a", "requires": "5.8", "tested": "6.5"}"#).unwrap();
    assert_eq!(with_string.requires.as_deref(), Some("5.8"));

    let with_false: PluginListing =
        serde_json::from_str(r#"{"slug": "a", "requires": false, "tested": false}"#).unwrap();
    assert_eq!(with_false.requires, None);
    assert_eq!(with_false.tested, None);

    let omitted: PluginListing = serde_json::from_str(r#"{"slug": "a"}"#).unwrap();
    assert_eq!(omitted.requires, None);
    assert_eq!(omitted.tested, None);
}

#[test]
fn test_vulnerability_record_tolerates_sparse_payloads() {
    let record: VulnerabilityRecord = serde_json::from_str(r#"{"title": "X"}"#).unwrap();
    assert_eq!(record.id, None);
    assert_eq!(record.title.as_deref(), Some("X"));
    assert!(record.references.is_none());
    assert!(record.cvss.is_none());
    assert!(record.closed.is_none());
    assert_eq!(record.verified, None);
}

#[test]
fn test_vulnerability_record_nested_groups() {
    let record: VulnerabilityRecord = serde_json::from_str(
        r#"{
            "id": "v1",
            "references": {"url": ["https://example.com"], "cve": ["CVE-2024-0001"]},
            "cvss": {"score": 9.8, "vector": "CVSS:3.1/AV:N", "severity": "critical"},
            "closed": {"closed_reason": "fixed"}
        }"#,
    )
    .unwrap();

    assert_eq!(
        record.references.unwrap().cve,
        Some(vec!["CVE-2024-0001".to_string()])
    );
    assert_eq!(record.cvss.unwrap().score, Some(9.8));
    assert_eq!(record.closed.unwrap().closed_reason.as_deref(), Some("fixed"));
}
