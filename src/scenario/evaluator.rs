use crate::error::{Error, Result};
use crate::graph::network::Network;
use crate::queueing::{Occupancy, QueueMetric};
use crate::scenario::scenario::{NodeParams, Scenario};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Clone, Debug, Serialize)]
pub struct NodeMetric {
    node: String,
    params: NodeParams,
    metric: QueueMetric,
}

impl NodeMetric {
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn params(&self) -> &NodeParams {
        &self.params
    }

    pub fn metric(&self) -> &QueueMetric {
        &self.metric
    }
}

/// Metrics of every network node under one scenario, in network order.
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioResult {
    scenario: String,
    nodes: Vec<NodeMetric>,
}

impl ScenarioResult {
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn nodes(&self) -> &[NodeMetric] {
        &self.nodes
    }

    pub fn get(&self, node: &str) -> Option<&NodeMetric> {
        self.nodes.iter().find(|n| n.node == node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Solves every node of `network` with the rates assigned by `scenario`.
///
/// All nodes must have parameters; entries for nodes outside the network are
/// ignored. Nothing is returned unless every node solves.
pub fn evaluate(network: &Network, scenario: &Scenario) -> Result<ScenarioResult> {
    let params = network
        .nodes()
        .iter()
        .map(|n| {
            scenario
                .params(n.name())
                .map(|p| (n.name(), *p))
                .ok_or_else(|| Error::MissingParameter {
                    node: n.name().to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let nodes = params
        .par_iter()
        .map(|(name, p)| -> Result<NodeMetric> {
            let metric = p
                .solve()
                .map_err(|e| e.with_context(format!("node '{name}'")))?;
            Ok(NodeMetric {
                node: name.to_string(),
                params: *p,
                metric,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    nodes
        .iter()
        .filter(|n| n.metric.is_congested())
        .for_each(|n| warn!(scenario = scenario.name(), node = %n.node, "unstable intersection"));
    debug!(
        scenario = scenario.name(),
        nodes = nodes.len(),
        "scenario evaluated"
    );

    Ok(ScenarioResult {
        scenario: scenario.name().to_string(),
        nodes,
    })
}

/// Relative change in occupancy between two scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Improvement {
    /// (before - after) / before * 100, rounded to two decimals
    Percent(f64),
    /// stable before, unstable after
    WorsenedToUnstable,
}

impl Improvement {
    pub fn between(before: Occupancy, after: Occupancy) -> Self {
        match (before, after) {
            (Occupancy::Finite(b), _) if b == 0.0 => Improvement::Percent(0.0),
            (Occupancy::Finite(b), Occupancy::Finite(a)) => {
                Improvement::Percent(((b - a) / b * 100.0 * 100.0).round() / 100.0)
            }
            (Occupancy::Finite(_), Occupancy::Unstable) => Improvement::WorsenedToUnstable,
            (Occupancy::Unstable, Occupancy::Finite(_)) => Improvement::Percent(100.0),
            (Occupancy::Unstable, Occupancy::Unstable) => Improvement::Percent(0.0),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NodeComparison {
    node: String,
    before: Occupancy,
    after: Occupancy,
    improvement: Improvement,
}

impl NodeComparison {
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn before(&self) -> Occupancy {
        self.before
    }

    pub fn after(&self) -> Occupancy {
        self.after
    }

    pub fn improvement(&self) -> Improvement {
        self.improvement
    }
}

/// Compares nodes present in both results, in the order of `before`.
pub fn compare(before: &ScenarioResult, after: &ScenarioResult) -> Vec<NodeComparison> {
    let after: HashMap<&str, &NodeMetric> =
        after.nodes().iter().map(|n| (n.node(), n)).collect();
    before
        .nodes()
        .iter()
        .filter_map(|b| {
            after.get(b.node()).map(|a| {
                let (lb, la) = (b.metric.occupancy(), a.metric.occupancy());
                NodeComparison {
                    node: b.node.clone(),
                    before: lb,
                    after: la,
                    improvement: Improvement::between(lb, la),
                }
            })
        })
        .collect()
}
