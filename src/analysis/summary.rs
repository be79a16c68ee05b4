use crate::scenario::evaluator::ScenarioResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Low,
    Moderate,
    High,
    Unstable,
}

/// Occupancy bounds (vehicles) separating the congestion levels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            moderate: 3.0,
            high: 6.0,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NodeLevel {
    node: String,
    level: CongestionLevel,
}

impl NodeLevel {
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn level(&self) -> CongestionLevel {
        self.level
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioSummary {
    scenario: String,
    node_count: usize,
    congested: Vec<String>,
    mean_occupancy: Option<f64>,
    worst_stable: Option<(String, f64)>,
    levels: Vec<NodeLevel>,
}

impl ScenarioSummary {
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Unstable nodes, in network order.
    pub fn congested(&self) -> &[String] {
        &self.congested
    }

    /// Mean occupancy over the stable nodes.
    pub fn mean_occupancy(&self) -> Option<f64> {
        self.mean_occupancy
    }

    /// Stable node with the highest occupancy.
    pub fn worst_stable(&self) -> Option<(&str, f64)> {
        self.worst_stable.as_ref().map(|(n, l)| (n.as_str(), *l))
    }

    pub fn levels(&self) -> &[NodeLevel] {
        &self.levels
    }
}

fn classify(metric_l: Option<f64>, thresholds: &LevelThresholds) -> CongestionLevel {
    match metric_l {
        None => CongestionLevel::Unstable,
        Some(l) if l > thresholds.high => CongestionLevel::High,
        Some(l) if l > thresholds.moderate => CongestionLevel::Moderate,
        Some(_) => CongestionLevel::Low,
    }
}

pub fn summarize(result: &ScenarioResult, thresholds: &LevelThresholds) -> ScenarioSummary {
    let occupancies: Vec<(&str, Option<f64>)> = result
        .nodes()
        .iter()
        .map(|n| (n.node(), n.metric().occupancy().finite()))
        .collect();

    let congested = occupancies
        .iter()
        .filter(|(_, l)| l.is_none())
        .map(|(n, _)| n.to_string())
        .collect();

    let stable: Vec<(&str, f64)> = occupancies
        .iter()
        .filter_map(|(n, l)| l.map(|l| (*n, l)))
        .collect();
    let mean_occupancy = if stable.is_empty() {
        None
    } else {
        Some(stable.iter().map(|(_, l)| l).sum::<f64>() / stable.len() as f64)
    };
    let worst_stable = stable
        .iter()
        .fold(None, |worst: Option<(&str, f64)>, &(n, l)| match worst {
            Some((_, w)) if w >= l => worst,
            _ => Some((n, l)),
        })
        .map(|(n, l)| (n.to_string(), l));

    let levels = occupancies
        .iter()
        .map(|(n, l)| NodeLevel {
            node: n.to_string(),
            level: classify(*l, thresholds),
        })
        .collect();

    ScenarioSummary {
        scenario: result.scenario().to_string(),
        node_count: result.len(),
        congested,
        mean_occupancy,
        worst_stable,
        levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::evaluator::evaluate;
    use crate::scenario::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_boundaries() {
        let t = LevelThresholds::default();
        assert_eq!(CongestionLevel::Low, classify(Some(0.0), &t));
        assert_eq!(CongestionLevel::Low, classify(Some(3.0), &t));
        assert_eq!(CongestionLevel::Moderate, classify(Some(3.01), &t));
        assert_eq!(CongestionLevel::Moderate, classify(Some(6.0), &t));
        assert_eq!(CongestionLevel::High, classify(Some(6.01), &t));
        assert_eq!(CongestionLevel::Unstable, classify(None, &t));
    }

    #[test]
    fn test_small_network_summary() {
        let result = evaluate(
            &presets::small_network().unwrap(),
            &presets::small_scenario().unwrap(),
        )
        .unwrap();
        let summary = summarize(&result, &LevelThresholds::default());

        assert_eq!("baseline", summary.scenario());
        assert_eq!(5, summary.node_count());
        assert_eq!(&["B".to_string()], summary.congested());
        // 2.5, 2.0, 3.0, 5.0
        assert_relative_eq!(3.125, summary.mean_occupancy().unwrap());
        assert_eq!(Some(("E", 5.0)), summary.worst_stable());

        let levels: Vec<CongestionLevel> = summary.levels().iter().map(|l| l.level()).collect();
        assert_eq!(
            vec![
                CongestionLevel::Low,
                CongestionLevel::Unstable,
                CongestionLevel::Low,
                CongestionLevel::Low,
                CongestionLevel::Moderate,
            ],
            levels
        );
    }

    #[test]
    fn test_mostly_unstable_corridor() {
        let net = presets::dhaka_network().unwrap();
        let result = evaluate(&net, &presets::dhaka_before().unwrap()).unwrap();
        let summary = summarize(
            &result,
            &LevelThresholds {
                moderate: 0.5,
                high: 1.0,
            },
        );
        assert_eq!(7, summary.congested().len());
        // Banani 2.0, Airport 0.75, Uttara-10 0.67
        assert_eq!(Some(("Banani", 2.0)), summary.worst_stable());
        assert_eq!(CongestionLevel::High, summary.levels()[6].level());
        assert_eq!(CongestionLevel::Moderate, summary.levels()[7].level());
    }
}
