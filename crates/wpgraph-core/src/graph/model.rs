//! Graph model types

use serde::{Deserialize, Serialize};

/// Kind of node in the vulnerability graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    WordPressVersion,
    Plugin,
    Vulnerability,
}

impl NodeKind {
    /// Node label and identity property name for this kind.
    #[must_use]
    pub fn identity(self) -> (&'static str, &'static str) {
        match self {
            Self::WordPressVersion => ("WordPressVersion", "version"),
            Self::Plugin => ("Plugin", "slug"),
            Self::Vulnerability => ("Vulnerability", "id"),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identity().0)
    }
}

/// Kind of edge/relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    HasVulnerability,
    IsCompatible,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::HasVulnerability => "HAS_VULNERABILITY",
            Self::IsCompatible => "IS_COMPATIBLE",
        };
        write!(f, "{s}")
    }
}

/// A typed reference to an edge endpoint that is expected to already
/// exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A WordPressVersion node, by version string
    Version(String),
    /// A Plugin node, by slug
    Plugin(String),
}

impl NodeRef {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Version(_) => NodeKind::WordPressVersion,
            Self::Plugin(_) => NodeKind::Plugin,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Version(v) | Self::Plugin(v) => v,
        }
    }
}
