//! Congestion estimates for road intersections modelled as M/M/1 and M/M/c
//! queues, with scenario comparison, sensitivity sweeps and hourly
//! time series.

pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod queueing;
pub mod scenario;
pub mod simulation;

pub use error::{Error, Result};
