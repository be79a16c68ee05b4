use crate::error::{Error, Result};
use crate::queueing::metric::{Occupancy, QueueMetric};

/// Largest lane count accepted by the M/M/c solver; `c!` stays exact in a u64.
pub const MAX_LANES: u32 = 20;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn factorial(n: u32) -> u64 {
    (1..=n as u64).product()
}

fn check_service_rate(mu: f64) -> Result<()> {
    if !mu.is_finite() || mu <= 0.0 {
        return Err(Error::invalid("mu", mu));
    }
    Ok(())
}

/// M/M/1 expected number in system, rounded to two decimals.
///
/// `lambda >= mu` has no steady state and yields [`Occupancy::Unstable`].
pub fn solve_single_server(lambda: f64, mu: f64) -> Result<QueueMetric> {
    check_service_rate(mu)?;
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(Error::invalid("lambda", lambda));
    }

    let rho = lambda / mu;
    let occupancy = if lambda >= mu {
        Occupancy::Unstable
    } else {
        Occupancy::Finite(round2(lambda / (mu - lambda)))
    };
    Ok(QueueMetric::single(rho, occupancy))
}

/// M/M/c steady state built from the Erlang C terms.
///
/// Values are reported unrounded. `lambda <= 0` means an empty system.
pub fn solve_multi_server(lambda: f64, mu: f64, lanes: u32) -> Result<QueueMetric> {
    check_service_rate(mu)?;
    if !lambda.is_finite() {
        return Err(Error::invalid("lambda", lambda));
    }
    if lanes == 0 || lanes > MAX_LANES {
        return Err(Error::invalid("lanes", lanes as f64));
    }

    if lambda <= 0.0 {
        return Ok(QueueMetric::multi(
            lanes,
            0.0,
            Occupancy::Finite(0.0),
            Occupancy::Finite(0.0),
            1.0,
        ));
    }

    let c = lanes as f64;
    let rho = lambda / (c * mu);
    if rho >= 1.0 {
        return Ok(QueueMetric::multi(
            lanes,
            rho,
            Occupancy::Unstable,
            Occupancy::Unstable,
            0.0,
        ));
    }

    let r = lambda / mu;
    let c_fact = factorial(lanes) as f64;
    let head: f64 = (0..lanes)
        .map(|n| r.powi(n as i32) / factorial(n) as f64)
        .sum();
    let r_c = r.powi(lanes as i32);
    let tail = r_c / (c_fact * (1.0 - rho));
    let p0 = 1.0 / (head + tail);
    let lq = (p0 * r_c * rho) / (c_fact * (1.0 - rho).powi(2));

    Ok(QueueMetric::multi(
        lanes,
        rho,
        Occupancy::Finite(lq + r),
        Occupancy::Finite(lq),
        p0,
    ))
}
