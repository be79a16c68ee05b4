use crate::error::Result;
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::network::Network;
use crate::graph::node::{Node, NodeId};
use crate::scenario::scenario::{NodeParams, Scenario};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Seeded generator for synthetic road networks and a matching scenario.
pub struct RandomNetwork {
    entries: usize,
    extra_roads_per_node: usize,
}

impl Default for RandomNetwork {
    fn default() -> Self {
        Self {
            entries: 3,
            extra_roads_per_node: 2,
        }
    }
}

impl RandomNetwork {
    pub fn new(entries: usize, extra_roads_per_node: usize) -> Self {
        Self {
            entries: entries.max(1),
            extra_roads_per_node,
        }
    }

    /// Every node is reachable from one of the entry nodes; roads never loop
    /// back onto their origin and never repeat.
    pub fn build(&self, seed: u64, node_count: usize) -> Result<(Network, Scenario)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let entries = self.entries.min(node_count);

        let nodes: Vec<Node> = (0..node_count)
            .map(|i| {
                let prefix = if i < entries { "entry" } else { "x" };
                Node::new(NodeId(i), format!("{prefix}-{i}"))
            })
            .collect();

        let mut edges = Vec::new();
        let mut has_edge = vec![vec![false; node_count]; node_count];
        let mut add_edge = |from: NodeId, to: NodeId, weight: f64| {
            if from == to || has_edge[from.index()][to.index()] {
                return;
            }
            has_edge[from.index()][to.index()] = true;
            edges.push(Edge::new(EdgeId(edges.len()), from, to, Some(weight)));
        };

        let mut reachable = vec![false; node_count];
        let mut frontier: Vec<NodeId> = (0..entries).map(NodeId).collect();
        frontier.iter().for_each(|id| reachable[id.index()] = true);

        while reachable.iter().any(|r| !r) {
            let from = frontier[rng.gen_range(0..frontier.len())];
            let to = NodeId(rng.gen_range(0..node_count));
            if !reachable[to.index()] {
                add_edge(from, to, rng.gen_range(1.0..6.0));
                reachable[to.index()] = true;
                frontier.push(to);
            }
        }

        if node_count > 1 {
            for _ in 0..node_count * self.extra_roads_per_node {
                let from = NodeId(rng.gen_range(0..node_count));
                let to = NodeId(rng.gen_range(0..node_count));
                add_edge(from, to, rng.gen_range(1.0..6.0));
            }
        }

        let lanes = [None, Some(2), Some(3)];
        let params = nodes
            .iter()
            .map(|n| {
                let lambda: f64 = rng.gen_range(1.0..10.0);
                let mu: f64 = rng.gen_range(2.0..12.0);
                let c = lanes[rng.gen_range(0..lanes.len())];
                NodeParams::new(lambda, mu, c).map(|p| (n.name().to_string(), p))
            })
            .collect::<Result<Vec<_>>>()?;

        let network = Network::new(nodes, edges)?;
        debug!(
            seed,
            nodes = network.node_count(),
            roads = network.edges().len(),
            "random network built"
        );
        let scenario = Scenario::new(format!("random-{seed}"), params)?;
        Ok((network, scenario))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::evaluator::evaluate;

    #[test]
    fn test_same_seed_same_network() {
        let generator = RandomNetwork::default();
        let (n1, s1) = generator.build(42, 30).unwrap();
        let (n2, s2) = generator.build(42, 30).unwrap();

        assert_eq!(n1.edges().len(), n2.edges().len());
        n1.edges().iter().zip(n2.edges()).for_each(|(a, b)| {
            assert_eq!(a.from(), b.from());
            assert_eq!(a.to(), b.to());
        });
        s1.iter().zip(s2.iter()).for_each(|(a, b)| assert_eq!(a, b));
    }

    #[test]
    fn test_every_node_reachable_from_entries() {
        let (net, _) = RandomNetwork::new(2, 1).build(7, 50).unwrap();

        let mut seen = vec![false; net.node_count()];
        let mut stack = vec![NodeId(0), NodeId(1)];
        while let Some(id) = stack.pop() {
            if seen[id.index()] {
                continue;
            }
            seen[id.index()] = true;
            net.outgoing(id)
                .iter()
                .for_each(|e| stack.push(net.edge_by_id(*e).to()));
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_no_loops_or_parallel_roads() {
        let (net, _) = RandomNetwork::default().build(3, 25).unwrap();
        let mut pairs = std::collections::HashSet::new();
        for e in net.edges() {
            assert_ne!(e.from(), e.to());
            assert!(pairs.insert((e.from(), e.to())));
        }
    }

    #[test]
    fn test_scenario_covers_network() {
        let (net, scenario) = RandomNetwork::default().build(11, 40).unwrap();
        let result = evaluate(&net, &scenario).unwrap();
        assert_eq!(40, result.len());
    }

    #[test]
    fn test_tiny_networks() {
        let (net, _) = RandomNetwork::default().build(1, 1).unwrap();
        assert_eq!(1, net.node_count());
        assert!(net.edges().is_empty());

        let (net, _) = RandomNetwork::default().build(1, 0).unwrap();
        assert_eq!(0, net.node_count());
    }
}
