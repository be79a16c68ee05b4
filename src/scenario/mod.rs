pub mod evaluator;
pub mod presets;
pub mod profile;
pub mod random;
pub mod scenario;

pub use evaluator::{Improvement, NodeComparison, NodeMetric, ScenarioResult, compare, evaluate};
pub use profile::{ArrivalProfile, ArrivalRate, PeakWindow};
pub use scenario::{NodeParams, Scenario};
