use crate::error::{Error, Result};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn validate(&self) -> Result<()> {
        let mut node_exists: FxHashSet<&str> = FxHashSet::default();
        for n in &self.nodes {
            if !node_exists.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
        }
        for l in &self.links {
            if !node_exists.contains(l.source.as_str()) || !node_exists.contains(l.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    link_id: l.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    /// Exclusion radius used by the collision force.
    pub collide_radius: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, collide_radius: f64) -> Self {
        Self {
            id: id.into(),
            collide_radius,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Link {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}->{target}"),
            source,
            target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub positions: std::collections::BTreeMap<String, Point>,
}
