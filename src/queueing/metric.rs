use serde::Serialize;
use std::fmt;

/// Expected number of vehicles at an intersection.
///
/// An unstable queue has no steady state and is never represented as a
/// (large) number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Finite(f64),
    Unstable,
}

impl Occupancy {
    pub fn is_unstable(&self) -> bool {
        matches!(self, Occupancy::Unstable)
    }

    pub fn finite(&self) -> Option<f64> {
        match self {
            Occupancy::Finite(v) => Some(*v),
            Occupancy::Unstable => None,
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupancy::Finite(v) => write!(f, "{v}"),
            Occupancy::Unstable => write!(f, "∞"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueModel {
    /// M/M/1
    SingleServer,
    /// M/M/c
    MultiServer { lanes: u32 },
}

/// Steady-state metrics for one intersection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueMetric {
    model: QueueModel,
    /// traffic intensity, lambda / (c * mu)
    utilization: f64,
    occupancy: Occupancy,
    /// M/M/c only
    queue_length: Option<Occupancy>,
    /// M/M/c only
    idle_probability: Option<f64>,
    congested: bool,
}

impl QueueMetric {
    pub(crate) fn single(utilization: f64, occupancy: Occupancy) -> Self {
        Self {
            model: QueueModel::SingleServer,
            utilization,
            occupancy,
            queue_length: None,
            idle_probability: None,
            congested: occupancy.is_unstable(),
        }
    }

    pub(crate) fn multi(
        lanes: u32,
        utilization: f64,
        occupancy: Occupancy,
        queue_length: Occupancy,
        idle_probability: f64,
    ) -> Self {
        Self {
            model: QueueModel::MultiServer { lanes },
            utilization,
            occupancy,
            queue_length: Some(queue_length),
            idle_probability: Some(idle_probability),
            congested: occupancy.is_unstable(),
        }
    }

    pub fn model(&self) -> QueueModel {
        self.model
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn queue_length(&self) -> Option<Occupancy> {
        self.queue_length
    }

    pub fn idle_probability(&self) -> Option<f64> {
        self.idle_probability
    }

    pub fn is_congested(&self) -> bool {
        self.congested
    }
}
