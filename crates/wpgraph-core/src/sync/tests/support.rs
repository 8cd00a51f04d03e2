//! In-memory store and stub collaborators for sync tests

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::directory::types::{PluginDetails, PluginListing, VersionDetails};
use crate::directory::{DirectoryError, PluginDirectory, VersionDirectory};
use crate::graph::model::{EdgeKind, NodeKind, NodeRef};
use crate::graph::neo4j::Neo4jError;
use crate::graph::plan::{PropValue, UpsertPlan};
use crate::graph::store::GraphStore;
use crate::version::{encode, CompatRange};

pub(super) type NodeProps = HashMap<&'static str, PropValue>;

/// In-memory `GraphStore` with the same merge and missing-endpoint
/// semantics as the Cypher queries
#[derive(Default)]
pub(super) struct MemStore {
    pub nodes: Mutex<HashMap<(NodeKind, String), NodeProps>>,
    pub edges: Mutex<HashSet<(EdgeKind, String, String)>>,
}

impl MemStore {
    pub fn node(&self, kind: NodeKind, key: &str) -> Option<NodeProps> {
        self.nodes
            .lock()
            .unwrap()
            .get(&(kind, key.to_string()))
            .cloned()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.lock().unwrap().len()
    }

    pub fn has_edge(&self, kind: EdgeKind, from: &str, to: &str) -> bool {
        self.edges
            .lock()
            .unwrap()
            .contains(&(kind, from.to_string(), to.to_string()))
    }

    /// Snapshot for whole-state idempotence comparisons
    pub fn snapshot(&self) -> (Vec<((NodeKind, String), Vec<(&'static str, PropValue)>)>, Vec<(EdgeKind, String, String)>) {
        let mut nodes: Vec<_> = self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .map(|(k, props)| {
                let mut sorted: Vec<_> = props.iter().map(|(n, v)| (*n, v.clone())).collect();
                sorted.sort_by_key(|(n, _)| *n);
                (k.clone(), sorted)
            })
            .collect();
        nodes.sort_by(|a, b| a.0.cmp(&b.0));

        let mut edges: Vec<_> = self.edges.lock().unwrap().iter().cloned().collect();
        edges.sort();
        (nodes, edges)
    }
}

#[async_trait]
impl GraphStore for MemStore {
    async fn node_exists(&self, kind: NodeKind, key: &str) -> Result<bool, Neo4jError> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .contains_key(&(kind, key.to_string())))
    }

    async fn upsert_node(&self, plan: &UpsertPlan) -> Result<(), Neo4jError> {
        let mut nodes = self.nodes.lock().unwrap();
        let props = nodes
            .entry((plan.kind(), plan.key().to_string()))
            .or_default();
        for (name, value) in plan.props() {
            match value {
                Some(v) => {
                    props.insert(name, v.clone());
                }
                // Only emitted under overwrite-always; clears the stored value
                None => {
                    props.remove(name);
                }
            }
        }
        Ok(())
    }

    async fn merge_vulnerability_edges(
        &self,
        source: &NodeRef,
        vulnerability_ids: &[String],
    ) -> Result<(), Neo4jError> {
        let nodes = self.nodes.lock().unwrap();
        if !nodes.contains_key(&(source.kind(), source.key().to_string())) {
            return Ok(());
        }

        let mut edges = self.edges.lock().unwrap();
        for id in vulnerability_ids {
            // Missing endpoint: match zero rows, create nothing
            if !nodes.contains_key(&(NodeKind::Vulnerability, id.clone())) {
                continue;
            }
            edges.insert((
                EdgeKind::HasVulnerability,
                source.key().to_string(),
                id.clone(),
            ));
        }
        Ok(())
    }

    async fn merge_compatibility_edges(
        &self,
        slug: &str,
        range: CompatRange,
    ) -> Result<(), Neo4jError> {
        let nodes = self.nodes.lock().unwrap();
        if !nodes.contains_key(&(NodeKind::Plugin, slug.to_string())) {
            return Ok(());
        }

        let mut edges = self.edges.lock().unwrap();
        for (kind, key) in nodes.keys() {
            if *kind == NodeKind::WordPressVersion && range.contains(encode(key)) {
                edges.insert((EdgeKind::IsCompatible, slug.to_string(), key.clone()));
            }
        }
        Ok(())
    }

    async fn versions_in_range(&self, range: CompatRange) -> Result<Vec<String>, Neo4jError> {
        let nodes = self.nodes.lock().unwrap();
        let mut versions: Vec<String> = nodes
            .keys()
            .filter(|(kind, key)| {
                *kind == NodeKind::WordPressVersion && range.contains(encode(key))
            })
            .map(|(_, key)| key.clone())
            .collect();
        versions.sort_by_key(|v| encode(v));
        Ok(versions)
    }
}

/// Version directory stub backed by a map; versions listed in `failing`
/// error out on fetch
#[derive(Default)]
pub(super) struct StubVersionDirectory {
    pub available: HashMap<String, VersionDetails>,
    pub failing: BTreeSet<String>,
}

#[async_trait]
impl VersionDirectory for StubVersionDirectory {
    async fn list_all_versions(&self) -> Result<Vec<String>, DirectoryError> {
        Ok(self.available.keys().cloned().collect())
    }

    async fn fetch_version(
        &self,
        version: &str,
    ) -> Result<Option<VersionDetails>, DirectoryError> {
        if self.failing.contains(version) {
            return Err(DirectoryError::InvalidResponse("stub failure".to_string()));
        }
        Ok(self.available.get(version).cloned())
    }
}

/// Plugin directory stub backed by a map
#[derive(Default)]
pub(super) struct StubPluginDirectory {
    pub available: HashMap<String, PluginDetails>,
    pub listings: Vec<PluginListing>,
    pub failing: BTreeSet<String>,
}

#[async_trait]
impl PluginDirectory for StubPluginDirectory {
    async fn list_all_plugins(&self) -> Result<Vec<PluginListing>, DirectoryError> {
        Ok(self.listings.clone())
    }

    async fn fetch_plugin(&self, slug: &str) -> Result<Option<PluginDetails>, DirectoryError> {
        if self.failing.contains(slug) {
            return Err(DirectoryError::InvalidResponse("stub failure".to_string()));
        }
        Ok(self.available.get(slug).cloned())
    }
}
