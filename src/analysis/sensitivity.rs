use crate::error::{Error, Result};
use crate::queueing::QueueMetric;
use crate::scenario::scenario::{NodeParams, Scenario};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, Serialize)]
pub struct SensitivityPoint {
    node: String,
    offset: f64,
    params: NodeParams,
    metric: QueueMetric,
}

impl SensitivityPoint {
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Perturbed arrival rate.
    pub fn lambda(&self) -> f64 {
        self.params.lambda()
    }

    pub fn mu(&self) -> f64 {
        self.params.mu()
    }

    pub fn lanes(&self) -> Option<u32> {
        self.params.lanes()
    }

    pub fn metric(&self) -> &QueueMetric {
        &self.metric
    }
}

/// Re-solves `node` with its arrival rate shifted by each offset in turn.
/// Shifted rates below zero are clamped to zero.
pub fn sweep(node: &str, baseline: &NodeParams, offsets: &[f64]) -> Result<Vec<SensitivityPoint>> {
    offsets
        .iter()
        .map(|o| -> Result<SensitivityPoint> {
            if !o.is_finite() {
                return Err(Error::invalid("offset", *o));
            }
            let params = baseline.with_lambda((baseline.lambda() + o).max(0.0))?;
            let metric = params.solve()?;
            Ok(SensitivityPoint {
                node: node.to_string(),
                offset: *o,
                params,
                metric,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map_err(|e| e.with_context(format!("node '{node}'")))
}

/// Sweeps each listed node around its baseline in `scenario`, concatenated in
/// node order.
pub fn sweep_scenario(
    scenario: &Scenario,
    nodes: &[impl AsRef<str>],
    offsets: &[f64],
) -> Result<Vec<SensitivityPoint>> {
    let mut points = Vec::with_capacity(nodes.len() * offsets.len());
    for node in nodes {
        let node = node.as_ref();
        let baseline = scenario
            .params(node)
            .ok_or_else(|| Error::MissingParameter {
                node: node.to_string(),
            })?;
        points.extend(sweep(node, baseline, offsets)?);
    }
    debug!(
        scenario = scenario.name(),
        points = points.len(),
        "sensitivity sweep complete"
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queueing::Occupancy;
    use crate::scenario::presets;

    #[test]
    fn test_sweep_across_stability_boundary() {
        let baseline = NodeParams::single(6.0, 6.0).unwrap();
        let points = sweep("Mirpur-10", &baseline, &[-1.0, 0.0, 1.0]).unwrap();

        let lambdas: Vec<f64> = points.iter().map(|p| p.lambda()).collect();
        assert_eq!(vec![5.0, 6.0, 7.0], lambdas);
        assert_eq!(Occupancy::Finite(5.0), points[0].metric().occupancy());
        assert_eq!(Occupancy::Unstable, points[1].metric().occupancy());
        assert_eq!(Occupancy::Unstable, points[2].metric().occupancy());
        assert!(points.iter().all(|p| p.mu() == 6.0));
    }

    #[test]
    fn test_negative_lambda_clamped() {
        let baseline = NodeParams::single(0.5, 4.0).unwrap();
        let points = sweep("A", &baseline, &[-1.0]).unwrap();
        assert_eq!(0.0, points[0].lambda());
        assert_eq!(Occupancy::Finite(0.0), points[0].metric().occupancy());
    }

    #[test]
    fn test_offsets_kept_in_order_with_duplicates() {
        let baseline = NodeParams::new(4.0, 3.0, Some(2)).unwrap();
        let points = sweep("A", &baseline, &[1.0, -1.0, 1.0]).unwrap();
        let offsets: Vec<f64> = points.iter().map(|p| p.offset()).collect();
        assert_eq!(vec![1.0, -1.0, 1.0], offsets);
        assert!(points.iter().all(|p| p.lanes() == Some(2)));
    }

    #[test]
    fn test_scenario_sweep() {
        let after = presets::dhaka_after().unwrap();
        let points =
            sweep_scenario(&after, &presets::SENSITIVITY_NODES, &presets::SENSITIVITY_OFFSETS)
                .unwrap();
        assert_eq!(9, points.len());

        // Tejgaon 8/10, Farmgate 8/9, Mirpur-10 5/7
        let nodes: Vec<&str> = points.iter().map(|p| p.node()).collect();
        assert_eq!(
            vec![
                "Tejgaon", "Tejgaon", "Tejgaon", "Farmgate", "Farmgate", "Farmgate", "Mirpur-10",
                "Mirpur-10", "Mirpur-10"
            ],
            nodes
        );
        assert_eq!(Occupancy::Finite(2.33), points[0].metric().occupancy());
        assert_eq!(Occupancy::Finite(4.0), points[1].metric().occupancy());
        assert_eq!(Occupancy::Finite(9.0), points[2].metric().occupancy());
        assert_eq!(Occupancy::Unstable, points[5].metric().occupancy());
        assert_eq!(Occupancy::Finite(2.5), points[7].metric().occupancy());
        assert_eq!(Occupancy::Finite(6.0), points[8].metric().occupancy());
    }

    #[test]
    fn test_unknown_node() {
        let after = presets::dhaka_after().unwrap();
        let err = sweep_scenario(&after, &["Motijheel"], &[0.0]).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref node } if node == "Motijheel"));
    }
}
