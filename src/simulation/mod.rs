pub mod timeseries;

pub use timeseries::{CapacitySeries, TimeSeries, TimeSeriesPoint, TimeSeriesSimulator};
