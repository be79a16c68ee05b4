//! Reference networks and rate assignments of the Dhaka corridor study.

use crate::error::Result;
use crate::graph::network::{Network, Road};
use crate::scenario::profile::{ArrivalProfile, PeakWindow};
use crate::scenario::scenario::Scenario;

pub const DHAKA_NODES: [&str; 10] = [
    "Farmgate",
    "Karwan Bazar",
    "Tejgaon",
    "Mohakhali",
    "Gulshan-1",
    "Gulshan-2",
    "Banani",
    "Airport",
    "Uttara-10",
    "Mirpur-10",
];

/// Five intersections A-E with travel times in minutes.
pub fn small_network() -> Result<Network> {
    Network::from_names(
        ["A", "B", "C", "D", "E"],
        [
            Road::weighted("A", "B", 3.0),
            Road::weighted("B", "C", 2.0),
            Road::weighted("C", "D", 4.0),
            Road::weighted("D", "E", 2.0),
            Road::weighted("E", "A", 3.0),
            Road::weighted("A", "C", 5.0),
            Road::weighted("B", "D", 4.0),
        ],
    )
}

pub fn small_scenario() -> Result<Scenario> {
    Scenario::from_rates(
        "baseline",
        [
            ("A", 5.0, 7.0),
            ("B", 6.0, 5.0),
            ("C", 4.0, 6.0),
            ("D", 3.0, 4.0),
            ("E", 5.0, 6.0),
        ],
    )
}

/// The corridor as surveyed.
pub fn dhaka_network() -> Result<Network> {
    Network::from_names(
        DHAKA_NODES,
        [
            Road::new("Farmgate", "Karwan Bazar"),
            Road::new("Karwan Bazar", "Tejgaon"),
            Road::new("Tejgaon", "Mohakhali"),
            Road::new("Mohakhali", "Gulshan-1"),
            Road::new("Gulshan-1", "Gulshan-2"),
            Road::new("Gulshan-2", "Banani"),
            Road::new("Banani", "Airport"),
            Road::new("Airport", "Uttara-10"),
            Road::new("Tejgaon", "Mirpur-10"),
            Road::new("Mirpur-10", "Farmgate"),
            Road::new("Mohakhali", "Banani"),
        ],
    )
}

/// The corridor after re-routing Mirpur-10 traffic through Gulshan-2.
pub fn dhaka_optimized_network() -> Result<Network> {
    Network::from_names(
        DHAKA_NODES,
        [
            Road::new("Farmgate", "Karwan Bazar"),
            Road::new("Karwan Bazar", "Tejgaon"),
            Road::new("Tejgaon", "Mohakhali"),
            Road::new("Mohakhali", "Gulshan-1"),
            Road::new("Gulshan-1", "Gulshan-2"),
            Road::new("Gulshan-2", "Banani"),
            Road::new("Banani", "Airport"),
            Road::new("Airport", "Uttara-10"),
            Road::new("Tejgaon", "Mirpur-10"),
            Road::new("Gulshan-2", "Mirpur-10"),
        ],
    )
}

pub fn dhaka_before() -> Result<Scenario> {
    Scenario::from_rates(
        "before",
        [
            ("Farmgate", 9.0, 7.0),
            ("Karwan Bazar", 8.0, 7.0),
            ("Tejgaon", 10.0, 8.0),
            ("Mohakhali", 7.0, 6.0),
            ("Gulshan-1", 6.0, 5.0),
            ("Gulshan-2", 5.0, 5.0),
            ("Banani", 4.0, 6.0),
            ("Airport", 3.0, 7.0),
            ("Uttara-10", 2.0, 5.0),
            ("Mirpur-10", 6.0, 6.0),
        ],
    )
}

pub fn dhaka_after() -> Result<Scenario> {
    Scenario::from_rates(
        "after",
        [
            ("Farmgate", 8.0, 9.0),
            ("Karwan Bazar", 7.0, 9.0),
            ("Tejgaon", 8.0, 10.0),
            ("Mohakhali", 6.0, 8.0),
            ("Gulshan-1", 5.0, 6.0),
            ("Gulshan-2", 4.0, 6.0),
            ("Banani", 4.0, 6.0),
            ("Airport", 3.0, 7.0),
            ("Uttara-10", 2.0, 5.0),
            ("Mirpur-10", 5.0, 7.0),
        ],
    )
}

/// Intersections swept by the sensitivity job and the offsets applied to them.
pub const SENSITIVITY_NODES: [&str; 3] = ["Tejgaon", "Farmgate", "Mirpur-10"];
pub const SENSITIVITY_OFFSETS: [f64; 3] = [-1.0, 0.0, 1.0];

/// Morning peak 7-9, evening peak 17-19.
pub fn commuter_profile() -> ArrivalProfile {
    ArrivalProfile::new(
        6.0,
        vec![
            PeakWindow {
                start: 7,
                end: 9,
                rate: 12.0,
            },
            PeakWindow {
                start: 17,
                end: 19,
                rate: 14.0,
            },
        ],
    )
}

pub const COMMUTER_SERVICE_RATE: f64 = 10.0;
pub const COMMUTER_LANES: [u32; 3] = [1, 2, 3];

pub fn commuter_hours() -> Vec<u32> {
    (6..=21).collect()
}
