use crate::graph::Point;
use indexmap::IndexSet;

/// Live layout state of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pinned coordinates; while set, the node ignores forces and sits here.
    pub fixed_x: Option<f64>,
    pub fixed_y: Option<f64>,
}

impl NodeState {
    pub fn point(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.fixed_x.is_some() || self.fixed_y.is_some()
    }
}

/// Mutable position table keyed by node id, in graph node order.
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    ids: IndexSet<String>,
    states: Vec<NodeState>,
}

impl PositionTable {
    pub fn with_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let ids: IndexSet<String> = ids.into_iter().map(str::to_string).collect();
        let states = vec![NodeState::default(); ids.len()];
        Self { ids, states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    pub fn get(&self, id: &str) -> Option<&NodeState> {
        self.states.get(self.index_of(id)?)
    }

    pub fn state(&self, idx: usize) -> Option<&NodeState> {
        self.states.get(idx)
    }

    pub fn state_mut(&mut self, idx: usize) -> Option<&mut NodeState> {
        self.states.get_mut(idx)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.get(id).map(NodeState::point)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeState)> {
        self.ids.iter().map(String::as_str).zip(self.states.iter())
    }

    pub(crate) fn states_mut(&mut self) -> &mut [NodeState] {
        &mut self.states
    }
}
