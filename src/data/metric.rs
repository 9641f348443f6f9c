//! The fixed set of chartable vehicle metrics.

use std::fmt;
use std::str::FromStr;

use crate::error::MetricError;

/// A recognized sensor metric. The wire name is the key used in inbound samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rpm,
    Speed,
    CoolantTemp,
    ThrottlePos,
    FuelLevel,
    Gear,
    Turbo,
}

impl Metric {
    /// All recognized metrics, in the order panels cycle through them.
    pub const ALL: [Metric; 7] = [
        Metric::Rpm,
        Metric::Speed,
        Metric::CoolantTemp,
        Metric::ThrottlePos,
        Metric::FuelLevel,
        Metric::Gear,
        Metric::Turbo,
    ];

    /// Key of this metric in an inbound sample.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Rpm => "RPM",
            Metric::Speed => "SPEED",
            Metric::CoolantTemp => "COOLANT_TEMP",
            Metric::ThrottlePos => "THROTTLE_POS",
            Metric::FuelLevel => "FUEL_LEVEL",
            Metric::Gear => "GEAR",
            Metric::Turbo => "TURBO",
        }
    }

    /// Default metric for panel slot `index`.
    pub fn for_slot(index: usize) -> Metric {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Look up a metric by its wire name (exact, case-sensitive).
    pub fn from_name(name: &str) -> Option<Metric> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::from_name(s).ok_or_else(|| MetricError::InvalidMetric(s.to_string()))
    }
}
