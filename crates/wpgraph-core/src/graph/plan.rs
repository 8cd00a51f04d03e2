//! Upsert planning: typed attribute maps and per-entity merge policies
//!
//! A plan captures everything a single node upsert needs: the node kind,
//! its identity value, and the candidate attributes with their (possibly
//! absent) values. Which attributes reach the store is decided by the
//! entity's merge policy, looked up from one table here rather than
//! scattered through the query code.

use std::collections::HashMap;

use neo4rs::{BoltBoolean, BoltFloat, BoltList, BoltType};

use super::model::NodeKind;

/// A typed property value that can be written to the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StrList(Vec<String>),
}

impl PropValue {
    pub(crate) fn to_bolt(&self) -> BoltType {
        match self {
            Self::Str(s) => BoltType::String(s.clone().into()),
            Self::Int(i) => BoltType::Integer((*i).into()),
            Self::Float(f) => BoltType::Float(BoltFloat::new(*f)),
            Self::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
            Self::StrList(items) => {
                let values: Vec<BoltType> = items
                    .iter()
                    .map(|s| BoltType::String(s.clone().into()))
                    .collect();
                BoltType::List(BoltList::from(values))
            }
        }
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(value: Vec<String>) -> Self {
        Self::StrList(value)
    }
}

/// How incoming attribute values combine with already-stored ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Every attribute is written on each upsert, absent values included.
    /// The authoritative source always wins.
    OverwriteAlways,
    /// Present attributes overwrite unconditionally; absent attributes
    /// are omitted from the write entirely.
    OverwriteIfPresent,
    /// Present attributes overwrite; absent attributes leave the stored
    /// value untouched.
    MergeIfPresent,
}

impl NodeKind {
    /// The merge policy applied to this entity's attributes.
    #[must_use]
    pub fn merge_policy(self) -> MergePolicy {
        match self {
            Self::WordPressVersion => MergePolicy::OverwriteAlways,
            Self::Plugin => MergePolicy::MergeIfPresent,
            Self::Vulnerability => MergePolicy::OverwriteIfPresent,
        }
    }
}

/// A planned upsert of a single node.
#[derive(Debug, Clone)]
pub struct UpsertPlan {
    kind: NodeKind,
    key: String,
    attrs: Vec<(&'static str, Option<PropValue>)>,
}

impl UpsertPlan {
    #[must_use]
    pub fn new(kind: NodeKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            attrs: Vec::new(),
        }
    }

    /// Add a candidate attribute. Whether an absent value is written is
    /// decided by the entity's merge policy, not here.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: Option<PropValue>) -> Self {
        self.attrs.push((name, value));
        self
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The attributes this plan will actually write, after applying the
    /// merge policy. A `None` value only survives under
    /// `OverwriteAlways`, where it clears the stored attribute; the
    /// other policies never emit a write for an absent attribute.
    pub fn props(&self) -> impl Iterator<Item = (&'static str, Option<&PropValue>)> {
        let keep_absent = self.kind.merge_policy() == MergePolicy::OverwriteAlways;
        self.attrs.iter().filter_map(move |(name, value)| {
            if value.is_some() || keep_absent {
                Some((*name, value.as_ref()))
            } else {
                None
            }
        })
    }

    /// The present attributes as a Bolt map suitable for a
    /// `SET n += $props` parameter. Absent attributes are never sent;
    /// `OverwriteAlways` removal is handled by resetting the node to its
    /// identity before the `+=` in the query itself.
    pub(crate) fn bolt_props(&self) -> HashMap<&'static str, BoltType> {
        self.props()
            .filter_map(|(name, value)| value.map(|v| (name, v.to_bolt())))
            .collect()
    }
}
