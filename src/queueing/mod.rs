pub mod metric;
pub mod solver;

pub use metric::{Occupancy, QueueMetric, QueueModel};
pub use solver::{MAX_LANES, solve_multi_server, solve_single_server};
