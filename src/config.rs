//! TOML description of a study: one network, named scenarios and the optional
//! sensitivity and time-series jobs run against them.

use crate::analysis::summary::LevelThresholds;
use crate::error::{Error, Result};
use crate::graph::network::{Network, Road};
use crate::scenario::presets;
use crate::scenario::profile::ArrivalProfile;
use crate::scenario::scenario::{NodeParams, Scenario};
use crate::simulation::timeseries::TimeSeriesSimulator;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct RoadConfig {
    pub from: String,
    pub to: String,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub roads: Vec<RoadConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParamsConfig {
    pub node: String,
    pub lambda: f64,
    pub mu: f64,
    pub lanes: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub params: Vec<ParamsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensitivityConfig {
    /// scenario providing the baseline rates
    pub scenario: String,
    pub nodes: Vec<String>,
    pub offsets: Vec<f64>,
}

/// Inclusive hour range.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesConfig {
    pub hours: HourRange,
    pub service_rate: f64,
    pub lanes: Vec<u32>,
    pub arrivals: ArrivalProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
    pub sensitivity: Option<SensitivityConfig>,
    pub timeseries: Option<TimeSeriesConfig>,
    #[serde(default)]
    pub thresholds: LevelThresholds,
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&text)?;
        info!(
            path = %path.as_ref().display(),
            nodes = config.network.nodes.len(),
            scenarios = config.scenarios.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Scenario names must be unique within a study.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        let mut seen = HashSet::new();
        if let Some(s) = config.scenarios.iter().find(|s| !seen.insert(s.name.as_str())) {
            return Err(Error::DuplicateScenario(s.name.clone()));
        }
        Ok(config)
    }

    pub fn build_network(&self) -> Result<Network> {
        Network::from_names(
            self.network.nodes.iter().cloned(),
            self.network.roads.iter().map(|r| Road {
                from: r.from.clone(),
                to: r.to.clone(),
                weight: r.weight,
            }),
        )
    }

    pub fn scenario(&self, name: &str) -> Result<Scenario> {
        let cfg = self
            .scenarios
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::UnknownScenario(name.to_string()))?;
        let params = cfg
            .params
            .iter()
            .map(|p| {
                NodeParams::new(p.lambda, p.mu, p.lanes)
                    .map(|np| (p.node.clone(), np))
                    .map_err(|e| e.with_context(format!("scenario '{name}', node '{}'", p.node)))
            })
            .collect::<Result<Vec<_>>>()?;
        Scenario::new(cfg.name.clone(), params)
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }

    pub fn build_timeseries(&self) -> Option<Result<TimeSeriesSimulator<ArrivalProfile>>> {
        self.timeseries.as_ref().map(|t| {
            TimeSeriesSimulator::new(
                (t.hours.start..=t.hours.end).collect(),
                t.arrivals.clone(),
                t.service_rate,
                t.lanes.clone(),
            )
        })
    }

    /// The Dhaka corridor study: surveyed network with "before" and "after"
    /// rates, the Tejgaon/Farmgate/Mirpur-10 sweep and the commuter peaks.
    pub fn dhaka() -> Result<Self> {
        let to_params = |s: Scenario| ScenarioConfig {
            name: s.name().to_string(),
            params: s
                .iter()
                .map(|(node, p)| ParamsConfig {
                    node: node.to_string(),
                    lambda: p.lambda(),
                    mu: p.mu(),
                    lanes: p.lanes(),
                })
                .collect(),
        };
        let scenarios = vec![
            to_params(presets::dhaka_before()?),
            to_params(presets::dhaka_after()?),
        ];

        let net = presets::dhaka_network()?;
        let roads = net
            .edges()
            .iter()
            .map(|e| RoadConfig {
                from: net.node_by_id(e.from()).name().to_string(),
                to: net.node_by_id(e.to()).name().to_string(),
                weight: e.weight(),
            })
            .collect();

        Ok(Self {
            network: NetworkConfig {
                nodes: presets::DHAKA_NODES.iter().map(|n| n.to_string()).collect(),
                roads,
            },
            scenarios,
            sensitivity: Some(SensitivityConfig {
                scenario: "after".to_string(),
                nodes: presets::SENSITIVITY_NODES
                    .iter()
                    .map(|n| n.to_string())
                    .collect(),
                offsets: presets::SENSITIVITY_OFFSETS.to_vec(),
            }),
            timeseries: Some(TimeSeriesConfig {
                hours: HourRange { start: 6, end: 21 },
                service_rate: presets::COMMUTER_SERVICE_RATE,
                lanes: presets::COMMUTER_LANES.to_vec(),
                arrivals: presets::commuter_profile(),
            }),
            thresholds: LevelThresholds::default(),
        })
    }
}
