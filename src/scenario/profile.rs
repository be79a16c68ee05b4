use serde::{Deserialize, Serialize};

/// Time-dependent arrival rate, in vehicles per unit time at a given hour.
pub trait ArrivalRate: Sync {
    fn rate_at(&self, hour: u32) -> f64;
}

impl<F> ArrivalRate for F
where
    F: Fn(u32) -> f64 + Sync,
{
    fn rate_at(&self, hour: u32) -> f64 {
        self(hour)
    }
}

/// Inclusive hour window with a fixed arrival rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start: u32,
    pub end: u32,
    pub rate: f64,
}

impl PeakWindow {
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour <= self.end
    }
}

/// Piecewise-constant arrivals: a baseline rate, overridden inside peak windows.
/// The first window containing the hour wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalProfile {
    pub baseline: f64,
    #[serde(default)]
    pub peaks: Vec<PeakWindow>,
}

impl ArrivalProfile {
    pub fn new(baseline: f64, peaks: Vec<PeakWindow>) -> Self {
        Self { baseline, peaks }
    }
}

impl ArrivalRate for ArrivalProfile {
    fn rate_at(&self, hour: u32) -> f64 {
        self.peaks
            .iter()
            .find(|p| p.contains(hour))
            .map(|p| p.rate)
            .unwrap_or(self.baseline)
    }
}
