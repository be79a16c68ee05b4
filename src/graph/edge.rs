use crate::graph::node::NodeId;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed road between two intersections.
#[derive(Clone, Debug, Serialize)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    /// travel time, minutes
    weight: Option<f64>,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, weight: Option<f64>) -> Self {
        Self {
            id,
            from,
            to,
            weight,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }
}
