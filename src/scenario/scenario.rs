use crate::error::{Error, Result};
use crate::queueing::{self, MAX_LANES, QueueMetric};
use serde::Serialize;
use std::collections::BTreeMap;

/// Rates for one intersection within a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NodeParams {
    /// arrival rate >= 0.0
    lambda: f64,
    /// service rate per lane > 0.0
    mu: f64,
    /// `None` selects the single server model
    lanes: Option<u32>,
}

impl NodeParams {
    pub fn new(lambda: f64, mu: f64, lanes: Option<u32>) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(Error::invalid("lambda", lambda));
        }
        if !mu.is_finite() || mu <= 0.0 {
            return Err(Error::invalid("mu", mu));
        }
        if let Some(c) = lanes {
            if c == 0 || c > MAX_LANES {
                return Err(Error::invalid("lanes", c as f64));
            }
        }
        Ok(Self { lambda, mu, lanes })
    }

    pub fn single(lambda: f64, mu: f64) -> Result<Self> {
        Self::new(lambda, mu, None)
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn lanes(&self) -> Option<u32> {
        self.lanes
    }

    /// Same service side, different arrival rate.
    pub fn with_lambda(&self, lambda: f64) -> Result<Self> {
        Self::new(lambda, self.mu, self.lanes)
    }

    /// Solves with M/M/1 when no lane count is given, M/M/c otherwise.
    pub fn solve(&self) -> Result<QueueMetric> {
        match self.lanes {
            None => queueing::solve_single_server(self.lambda, self.mu),
            Some(c) => queueing::solve_multi_server(self.lambda, self.mu, c),
        }
    }
}

/// A named rate assignment over the nodes of a network.
#[derive(Clone, Debug, Serialize)]
pub struct Scenario {
    name: String,
    params: BTreeMap<String, NodeParams>,
}

impl Scenario {
    /// Each node may be assigned at most once.
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, NodeParams)>,
        S: Into<String>,
    {
        let name = name.into();
        let mut map = BTreeMap::new();
        for (node, p) in params {
            let node = node.into();
            if map.contains_key(&node) {
                return Err(Error::DuplicateParameter {
                    scenario: name,
                    node,
                });
            }
            map.insert(node, p);
        }
        Ok(Self { name, params: map })
    }

    /// Builds a single-server scenario from `(node, lambda, mu)` rows.
    pub fn from_rates<'a>(
        name: impl Into<String>,
        rows: impl IntoIterator<Item = (&'a str, f64, f64)>,
    ) -> Result<Self> {
        let params = rows
            .into_iter()
            .map(|(node, lambda, mu)| {
                NodeParams::single(lambda, mu)
                    .map(|p| (node, p))
                    .map_err(|e| e.with_context(format!("node '{node}'")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, params)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self, node: &str) -> Option<&NodeParams> {
        self.params.get(node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeParams)> {
        self.params.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queueing::Occupancy;

    #[test]
    fn test_params_validation() {
        assert!(NodeParams::new(1.0, 2.0, Some(3)).is_ok());
        assert!(NodeParams::new(0.0, 2.0, None).is_ok());
        assert!(matches!(
            NodeParams::new(-1.0, 2.0, None),
            Err(Error::InvalidParameter { parameter: "lambda", .. })
        ));
        assert!(matches!(
            NodeParams::new(1.0, 0.0, None),
            Err(Error::InvalidParameter { parameter: "mu", .. })
        ));
        assert!(matches!(
            NodeParams::new(1.0, 2.0, Some(0)),
            Err(Error::InvalidParameter { parameter: "lanes", .. })
        ));
    }

    #[test]
    fn test_solve_dispatch() {
        let single = NodeParams::new(12.0, 10.0, None).unwrap().solve().unwrap();
        let multi = NodeParams::new(12.0, 10.0, Some(2)).unwrap().solve().unwrap();
        assert_eq!(Occupancy::Unstable, single.occupancy());
        assert!(!multi.is_congested());
    }

    #[test]
    fn test_from_rates_reports_node() {
        let err = Scenario::from_rates("bad", [("A", 1.0, 2.0), ("B", 1.0, -2.0)]).unwrap_err();
        assert_eq!("Invalid parameter mu = -2 (node 'B')", err.to_string());
    }

    #[test]
    fn test_repeated_node_rejected() {
        let err = Scenario::from_rates("s", [("A", 1.0, 2.0), ("B", 1.0, 2.0), ("A", 9.0, 2.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateParameter { ref scenario, ref node } if scenario == "s" && node == "A"
        ));
    }

    #[test]
    fn test_lookup() {
        let s = Scenario::from_rates("s", [("A", 5.0, 7.0)]).unwrap();
        assert_eq!("s", s.name());
        assert_eq!(1, s.len());
        assert_eq!(5.0, s.params("A").unwrap().lambda());
        assert!(s.params("B").is_none());
    }
}
