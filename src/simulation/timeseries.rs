use crate::error::{Error, Result};
use crate::queueing::{MAX_LANES, Occupancy, solve_multi_server};
use crate::scenario::profile::ArrivalRate;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    lanes: u32,
    hour: u32,
    lambda: f64,
    occupancy: Occupancy,
}

impl TimeSeriesPoint {
    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn is_unstable(&self) -> bool {
        self.occupancy.is_unstable()
    }
}

/// One lane configuration over the hour axis.
#[derive(Clone, Debug, Serialize)]
pub struct CapacitySeries {
    lanes: u32,
    points: Vec<TimeSeriesPoint>,
    unstable_hours: Vec<u32>,
}

impl CapacitySeries {
    fn new(lanes: u32, points: Vec<TimeSeriesPoint>) -> Self {
        let unstable_hours = points
            .iter()
            .filter(|p| p.is_unstable())
            .map(|p| p.hour)
            .collect();
        Self {
            lanes,
            points,
            unstable_hours,
        }
    }

    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Points in the order of the configured hours.
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Hours at which the queue has no steady state, in hour order.
    pub fn unstable_hours(&self) -> &[u32] {
        &self.unstable_hours
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TimeSeries {
    service_rate: f64,
    series: Vec<CapacitySeries>,
}

impl TimeSeries {
    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Series in the order of the configured lane counts.
    pub fn series(&self) -> &[CapacitySeries] {
        &self.series
    }

    pub fn get(&self, lanes: u32) -> Option<&CapacitySeries> {
        self.series.iter().find(|s| s.lanes == lanes)
    }

    pub fn unstable_hours(&self, lanes: u32) -> Option<&[u32]> {
        self.get(lanes).map(|s| s.unstable_hours())
    }
}

/// Solves an M/M/c intersection for every (lane count, hour) pair under a
/// time-dependent arrival rate.
pub struct TimeSeriesSimulator<A: ArrivalRate> {
    hours: Vec<u32>,
    arrivals: A,
    service_rate: f64,
    lanes: Vec<u32>,
}

impl<A: ArrivalRate> TimeSeriesSimulator<A> {
    pub fn new(hours: Vec<u32>, arrivals: A, service_rate: f64, lanes: Vec<u32>) -> Result<Self> {
        if !service_rate.is_finite() || service_rate <= 0.0 {
            return Err(Error::invalid("mu", service_rate));
        }
        if let Some(c) = lanes.iter().find(|c| **c == 0 || **c > MAX_LANES) {
            return Err(Error::invalid("lanes", *c as f64));
        }
        for (i, c) in lanes.iter().enumerate() {
            if lanes[..i].contains(c) {
                return Err(Error::invalid("lanes", *c as f64).with_context("repeated"));
            }
        }
        Ok(Self {
            hours,
            arrivals,
            service_rate,
            lanes,
        })
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    pub fn lanes(&self) -> &[u32] {
        &self.lanes
    }

    pub fn run(&self) -> Result<TimeSeries> {
        let cells: Vec<(u32, u32)> = self
            .lanes
            .iter()
            .flat_map(|c| self.hours.iter().map(move |h| (*c, *h)))
            .collect();

        let points = cells
            .par_iter()
            .map(|&(lanes, hour)| -> Result<TimeSeriesPoint> {
                let lambda = self.arrivals.rate_at(hour);
                let metric = solve_multi_server(lambda, self.service_rate, lanes)
                    .map_err(|e| e.with_context(format!("hour {hour}, {lanes} lanes")))?;
                Ok(TimeSeriesPoint {
                    lanes,
                    hour,
                    lambda,
                    occupancy: metric.occupancy(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let series: Vec<CapacitySeries> = if self.hours.is_empty() {
            self.lanes
                .iter()
                .map(|c| CapacitySeries::new(*c, Vec::new()))
                .collect()
        } else {
            self.lanes
                .iter()
                .zip(points.chunks(self.hours.len()))
                .map(|(c, chunk)| CapacitySeries::new(*c, chunk.to_vec()))
                .collect()
        };

        series.iter().for_each(|s| {
            debug!(
                lanes = s.lanes,
                unstable = s.unstable_hours.len(),
                "capacity series solved"
            )
        });
        info!(
            hours = self.hours.len(),
            configurations = series.len(),
            "time series complete"
        );

        Ok(TimeSeries {
            service_rate: self.service_rate,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::profile::{ArrivalProfile, PeakWindow};
    use approx::assert_relative_eq;

    fn rate(hour: u32) -> f64 {
        match hour {
            7 => 12.0,
            18 => 14.0,
            _ => 6.0,
        }
    }

    #[test]
    fn test_peak_hours_unstable_on_one_lane() {
        let sim = TimeSeriesSimulator::new(vec![7, 12, 18], rate, 10.0, vec![1, 2]).unwrap();
        let ts = sim.run().unwrap();

        let one = ts.get(1).unwrap();
        let hours: Vec<u32> = one.points().iter().map(|p| p.hour()).collect();
        assert_eq!(vec![7, 12, 18], hours);
        assert_eq!(&[7, 18], one.unstable_hours());
        assert_relative_eq!(
            1.5,
            one.points()[1].occupancy().finite().unwrap(),
            epsilon = 1e-12
        );

        let two = ts.get(2).unwrap();
        assert!(two.unstable_hours().is_empty());
        assert!(two.points().iter().all(|p| !p.is_unstable()));
        assert_relative_eq!(
            1.875,
            two.points()[0].occupancy().finite().unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_series_follow_input_order() {
        let profile = ArrivalProfile::new(
            6.0,
            vec![PeakWindow {
                start: 17,
                end: 19,
                rate: 14.0,
            }],
        );
        let sim = TimeSeriesSimulator::new(vec![20, 18, 6], profile, 10.0, vec![3, 1, 2]).unwrap();
        let ts = sim.run().unwrap();

        let lanes: Vec<u32> = ts.series().iter().map(|s| s.lanes()).collect();
        assert_eq!(vec![3, 1, 2], lanes);
        for s in ts.series() {
            let hours: Vec<u32> = s.points().iter().map(|p| p.hour()).collect();
            assert_eq!(vec![20, 18, 6], hours);
            assert!(s.points().iter().all(|p| p.lanes() == s.lanes()));
        }
        assert_eq!(Some(&[18][..]), ts.unstable_hours(1));
        assert_eq!(None, ts.unstable_hours(4));
    }

    #[test]
    fn test_more_lanes_lower_occupancy() {
        let sim = TimeSeriesSimulator::new((6..=21).collect(), rate, 10.0, vec![2, 3, 4]).unwrap();
        let ts = sim.run().unwrap();
        for i in 0..16 {
            let l: Vec<f64> = ts
                .series()
                .iter()
                .map(|s| s.points()[i].occupancy().finite().unwrap())
                .collect();
            assert!(l[0] >= l[1] && l[1] >= l[2]);
        }
    }

    #[test]
    fn test_empty_hours() {
        let sim = TimeSeriesSimulator::new(Vec::new(), rate, 10.0, vec![1, 2]).unwrap();
        let ts = sim.run().unwrap();
        assert_eq!(2, ts.series().len());
        assert!(ts.series().iter().all(|s| s.points().is_empty()));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            TimeSeriesSimulator::new(vec![7], rate, 0.0, vec![1]),
            Err(Error::InvalidParameter { parameter: "mu", .. })
        ));
        assert!(matches!(
            TimeSeriesSimulator::new(vec![7], rate, 10.0, vec![1, 0]),
            Err(Error::InvalidParameter { parameter: "lanes", .. })
        ));
    }

    #[test]
    fn test_repeated_lane_count_rejected() {
        let err = TimeSeriesSimulator::new(vec![7], rate, 10.0, vec![1, 2, 1])
            .err()
            .unwrap();
        assert_eq!("Invalid parameter lanes = 1 (repeated)", err.to_string());
    }

    #[test]
    fn test_non_finite_rate_reports_hour() {
        let sim = TimeSeriesSimulator::new(
            vec![5, 6],
            |h: u32| if h == 6 { f64::NAN } else { 1.0 },
            10.0,
            vec![1],
        )
        .unwrap();
        let err = sim.run().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter { context: Some(ref c), .. } if c == "hour 6, 1 lanes"
        ));
    }
}
