pub mod sensitivity;
pub mod summary;

pub use sensitivity::{SensitivityPoint, sweep, sweep_scenario};
pub use summary::{CongestionLevel, LevelThresholds, ScenarioSummary, summarize};
