use crate::error::{Error, Result};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use serde::Serialize;
use std::collections::HashMap;

/// Road between two named intersections, as supplied by a caller.
#[derive(Clone, Debug)]
pub struct Road {
    pub from: String,
    pub to: String,
    pub weight: Option<f64>,
}

impl Road {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: None,
        }
    }

    pub fn weighted(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: Some(weight),
        }
    }
}

/// Intersections and the directed roads between them.
///
/// Node names are unique and every road endpoint resolves to a node; both are
/// checked on construction so evaluation never sees a dangling reference.
#[derive(Clone, Debug, Serialize)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    adj: Vec<Vec<EdgeId>>,
    #[serde(skip)]
    incoming: Vec<Vec<EdgeId>>,
    #[serde(skip)]
    by_name: HashMap<String, NodeId>,
}

impl Network {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            if n.id().index() != i {
                return Err(Error::invalid("node index", n.id().index() as f64)
                    .with_context(format!("node '{}'", n.name())));
            }
            if by_name.insert(n.name().to_string(), n.id()).is_some() {
                return Err(Error::DuplicateNode(n.name().to_string()));
            }
        }

        let label = |id: NodeId| {
            nodes
                .get(id.index())
                .map(|n| n.name().to_string())
                .unwrap_or_else(|| format!("#{}", id.index()))
        };
        for (i, e) in edges.iter().enumerate() {
            if e.id().index() != i {
                return Err(Error::invalid("edge index", e.id().index() as f64)
                    .with_context(format!("road {} -> {}", label(e.from()), label(e.to()))));
            }
            if let Some(w) = e.weight() {
                if !w.is_finite() || w < 0.0 {
                    return Err(Error::invalid("weight", w)
                        .with_context(format!("road {} -> {}", label(e.from()), label(e.to()))));
                }
            }
            for end in [e.from(), e.to()] {
                if end.index() >= nodes.len() {
                    return Err(Error::GraphConsistency {
                        from: label(e.from()),
                        to: label(e.to()),
                        missing: label(end),
                    });
                }
            }
        }

        let mut adj: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        let mut incoming: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        edges.iter().for_each(|e| {
            adj[e.from().index()].push(e.id());
            incoming[e.to().index()].push(e.id());
        });

        Ok(Self {
            nodes,
            edges,
            adj,
            incoming,
            by_name,
        })
    }

    /// Builds a network from node names and roads referencing them by name.
    pub fn from_names<I, S>(names: I, roads: impl IntoIterator<Item = Road>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes: Vec<Node> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Node::new(NodeId(i), name))
            .collect();

        let mut index = HashMap::with_capacity(nodes.len());
        for n in &nodes {
            if index.insert(n.name(), n.id()).is_some() {
                return Err(Error::DuplicateNode(n.name().to_string()));
            }
        }

        let mut edges = Vec::new();
        for (i, road) in roads.into_iter().enumerate() {
            let resolve = |name: &str| {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| Error::GraphConsistency {
                        from: road.from.clone(),
                        to: road.to.clone(),
                        missing: name.to_string(),
                    })
            };
            let from = resolve(&road.from)?;
            let to = resolve(&road.to)?;
            edges.push(Edge::new(EdgeId(i), from, to, road.weight));
        }

        Self::new(nodes, edges)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_by_id(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.by_name.get(name).map(|id| self.node_by_id(*id))
    }

    pub fn edge_by_id(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn outgoing(&self, id: NodeId) -> &[EdgeId] {
        &self.adj[id.index()]
    }

    pub fn incoming(&self, id: NodeId) -> &[EdgeId] {
        &self.incoming[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
