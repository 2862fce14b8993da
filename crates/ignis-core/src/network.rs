//! Transient partner graph: one central company node plus one node per partner.
//!
//! The model is immutable domain data only. Live layout state (positions, velocities, pins)
//! lives in the simulation's position table, keyed by the same node indices.

use crate::partners::{Classification, PartnerRecord};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub is_central: bool,
    pub weight: Option<f64>,
    pub classification: Option<Classification>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source_id: String,
    pub target_id: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphInvariantError {
    #[error("expected exactly one central node, found {count}")]
    CentralCount { count: usize },
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },
    #[error("link {source_id} -> {target_id} has a missing endpoint")]
    MissingEndpoint {
        source_id: String,
        target_id: String,
    },
    #[error("link {source_id} -> {target_id} does not touch the central node")]
    DetachedLink {
        source_id: String,
        target_id: String,
    },
}

impl GraphModel {
    /// Builds the star graph for `central_id` and its partners.
    ///
    /// Returns an empty model when `partners` is empty. Partners whose id collides with the
    /// central id or with an earlier partner are dropped, since node ids must be unique.
    pub fn build(central_id: &str, partners: &[PartnerRecord]) -> Self {
        if partners.is_empty() {
            return Self::default();
        }

        let mut seen: IndexSet<&str> = IndexSet::with_capacity(partners.len() + 1);
        seen.insert(central_id);

        let mut nodes = Vec::with_capacity(partners.len() + 1);
        nodes.push(GraphNode {
            id: central_id.to_string(),
            is_central: true,
            weight: None,
            classification: None,
        });
        let mut links = Vec::with_capacity(partners.len());

        for p in partners {
            if !seen.insert(p.id.as_str()) {
                tracing::debug!(partner = %p.id, "dropping partner with duplicate node id");
                continue;
            }
            nodes.push(GraphNode {
                id: p.id.clone(),
                is_central: false,
                weight: Some(p.weight),
                classification: p.classification,
            });
            links.push(GraphLink {
                source_id: central_id.to_string(),
                target_id: p.id.clone(),
                weight: p.weight,
            });
        }

        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn central(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.is_central)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Checks the star-graph invariants. An empty model is valid.
    pub fn validate(&self) -> Result<(), GraphInvariantError> {
        if self.nodes.is_empty() && self.links.is_empty() {
            return Ok(());
        }

        let count = self.nodes.iter().filter(|n| n.is_central).count();
        if count != 1 {
            return Err(GraphInvariantError::CentralCount { count });
        }
        let central = self
            .central()
            .map(|n| n.id.as_str())
            .unwrap_or_default();

        let mut ids: FxHashSet<&str> = FxHashSet::default();
        for n in &self.nodes {
            if !ids.insert(n.id.as_str()) {
                return Err(GraphInvariantError::DuplicateNode { id: n.id.clone() });
            }
        }

        for l in &self.links {
            if !ids.contains(l.source_id.as_str()) || !ids.contains(l.target_id.as_str()) {
                return Err(GraphInvariantError::MissingEndpoint {
                    source_id: l.source_id.clone(),
                    target_id: l.target_id.clone(),
                });
            }
            if l.source_id != central && l.target_id != central {
                return Err(GraphInvariantError::DetachedLink {
                    source_id: l.source_id.clone(),
                    target_id: l.target_id.clone(),
                });
            }
        }
        Ok(())
    }
}
