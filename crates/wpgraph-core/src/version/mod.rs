//! Version module: compatibility range resolution
//!
//! Turns the loosely-structured `requires`/`tested` strings that plugin
//! listings carry into an inclusive integer range over encoded WordPress
//! core versions. Everything here is pure; the same encoding formula is
//! embedded in the bulk Cypher recompute (see `graph::queries::compat`),
//! and the two call sites must agree bit-for-bit.


/// Upper bound used when no `tested` version is known.
///
/// Encodes as "every version below 100.0.0", i.e. universal compatibility
/// on the high side.
pub const MAX_ENCODED: i64 = 999_999;

/// Normalize a raw version string to exactly three dot-separated
/// components, padding missing trailing components with `"0"`.
///
/// Returns `None` for absent or whitespace-only input. Components are not
/// validated; `"6.5.x"` canonicalizes to `"6.5.x"` and degrades at encode
/// time instead.
#[must_use]
pub fn canonicalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts: Vec<&str> = trimmed.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    Some(parts.join("."))
}

/// Encode a version string as a single comparable integer:
/// `major * 10000 + minor * 100 + patch`.
///
/// Missing components, components that fail to parse as base-10
/// integers, and components too large to scale without overflowing all
/// count as 0, so the function is total and never errors. It is
/// deliberately lossy: `"6.5"`, `"6.5.0"`, and `"6.5.x"` all encode to
/// the same integer.
#[must_use]
pub fn encode(version: &str) -> i64 {
    let mut components = version.split('.');
    let mut part = |scale: i64| {
        components
            .next()
            .and_then(|c| c.trim().parse::<i64>().ok())
            .and_then(|n| n.checked_mul(scale))
            .unwrap_or(0)
    };
    part(10_000)
        .saturating_add(part(100))
        .saturating_add(part(1))
}

/// An inclusive range of encoded WordPress core versions a plugin is
/// considered compatible with.
///
/// `lower <= upper` is not enforced; malformed input can produce an empty
/// range, which simply matches no versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatRange {
    pub lower: i64,
    pub upper: i64,
}

impl CompatRange {
    /// Derive the compatibility range from a plugin's raw `requires` and
    /// `tested` strings.
    ///
    /// Policy: with neither bound known the plugin is assumed universally
    /// compatible; a lone `requires` is open-ended upward; a lone
    /// `tested` is open-ended downward.
    #[must_use]
    pub fn resolve(requires: Option<&str>, tested: Option<&str>) -> Self {
        let requires = canonicalize(requires);
        let tested = canonicalize(tested);

        match (requires.as_deref(), tested.as_deref()) {
            (None, None) => Self {
                lower: 0,
                upper: MAX_ENCODED,
            },
            (Some(r), Some(t)) => Self {
                lower: encode(r),
                upper: encode(t),
            },
            (Some(r), None) => Self {
                lower: encode(r),
                upper: MAX_ENCODED,
            },
            (None, Some(t)) => Self {
                lower: 0,
                upper: encode(t),
            },
        }
    }

    /// Whether an encoded version integer falls inside the range.
    #[must_use]
    pub fn contains(&self, encoded: i64) -> bool {
        encoded >= self.lower && encoded <= self.upper
    }
}
