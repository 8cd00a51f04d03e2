//! Tests for the `summary_line` function
//!
//! Validates the sync summary formatting across empty, mixed, and
//! large-count runs.

use super::super::{summary_line, Phase1Result, Phase2Result, Phase3Result};
use wpgraph_core::sync::{CompatReport, SyncReport};

fn phase1(inserted: usize, already_present: usize, failed: usize) -> Phase1Result {
    Phase1Result {
        report: SyncReport {
            inserted,
            already_present,
            failed,
        },
    }
}

fn phase2(inserted: usize, already_present: usize, failed: usize) -> Phase2Result {
    Phase2Result {
        report: SyncReport {
            inserted,
            already_present,
            failed,
        },
    }
}

fn phase3(plugins_processed: usize) -> Phase3Result {
    Phase3Result {
        report: CompatReport { plugins_processed },
    }
}

#[test]
fn test_summary_line_all_zero() {
    let line = summary_line(&phase1(0, 0, 0), &phase2(0, 0, 0), &phase3(0));
    assert_eq!(
        line,
        "✓ Sync completed: 0 new plugins (0 present, 0 failed), 0 new versions (0 present, 0 failed), 0 plugins compatibility-checked"
    );
}

#[test]
fn test_summary_line_mixed_counts() {
    let line = summary_line(&phase1(12, 3, 1), &phase2(40, 200, 2), &phase3(5000));
    assert_eq!(
        line,
        "✓ Sync completed: 12 new plugins (3 present, 1 failed), 40 new versions (200 present, 2 failed), 5000 plugins compatibility-checked"
    );
}

#[test]
fn test_summary_line_reflects_plugin_counts() {
    let line = summary_line(&phase1(7, 0, 0), &phase2(0, 0, 0), &phase3(0));
    assert!(line.contains("7 new plugins"));
}

#[test]
fn test_summary_line_reflects_version_counts() {
    let line = summary_line(&phase1(0, 0, 0), &phase2(0, 13, 4), &phase3(0));
    assert!(line.contains("0 new versions (13 present, 4 failed)"));
}

#[test]
fn test_summary_line_reflects_compat_count() {
    let line = summary_line(&phase1(0, 0, 0), &phase2(0, 0, 0), &phase3(42));
    assert!(line.contains("42 plugins compatibility-checked"));
}

#[test]
fn test_summary_line_large_values() {
    let line = summary_line(
        &phase1(100_000, 999_999, 0),
        &phase2(700, 0, 0),
        &phase3(1_000_000),
    );
    assert!(line.contains("100000 new plugins (999999 present, 0 failed)"));
    assert!(line.contains("1000000 plugins compatibility-checked"));
}
