//! Latest-value readouts shown on the live tab.

use crate::clock::Stamp;
use crate::data::metric::Metric;
use crate::data::sample::{Sample, SampleValue};
use crate::sink::SampleObserver;

/// Shown when a readout has no value.
pub const PLACEHOLDER: &str = "--";

/// How a readout tile formats its metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutFormat {
    /// Fixed number of decimals.
    Fixed(usize),
    /// Value shown as-is; zero and empty text count as missing.
    Raw,
}

/// Metrics displayed as big-number tiles, in display order.
pub const READOUTS: [(Metric, ReadoutFormat); 5] = [
    (Metric::Rpm, ReadoutFormat::Fixed(0)),
    (Metric::Speed, ReadoutFormat::Fixed(0)),
    (Metric::ThrottlePos, ReadoutFormat::Fixed(1)),
    (Metric::Turbo, ReadoutFormat::Fixed(0)),
    (Metric::Gear, ReadoutFormat::Raw),
];

/// Holds the most recent sample. Every sample fully replaces the previous one.
#[derive(Debug, Default)]
pub struct LiveReadout {
    last: Option<Sample>,
}

impl LiveReadout {
    pub fn latest(&self) -> Option<&Sample> {
        self.last.as_ref()
    }

    pub fn display(&self, metric: Metric, format: ReadoutFormat) -> String {
        let Some(value) = self.last.as_ref().and_then(|s| s.metric(metric)) else {
            return PLACEHOLDER.to_string();
        };
        format_value(value, format)
    }
}

fn format_value(value: &SampleValue, format: ReadoutFormat) -> String {
    match (format, value) {
        (ReadoutFormat::Fixed(decimals), v) => match v.as_f64() {
            Some(f) => format!("{f:.decimals$}"),
            None => PLACEHOLDER.to_string(),
        },
        (ReadoutFormat::Raw, SampleValue::Number(n)) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => PLACEHOLDER.to_string(),
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        (ReadoutFormat::Raw, SampleValue::Text(s)) if s.is_empty() => PLACEHOLDER.to_string(),
        (ReadoutFormat::Raw, SampleValue::Text(s)) => s.clone(),
        (ReadoutFormat::Raw, SampleValue::Other(v)) => match v {
            serde_json::Value::Null | serde_json::Value::Bool(false) => PLACEHOLDER.to_string(),
            serde_json::Value::Bool(true) => "true".to_string(),
            other => other.to_string(),
        },
    }
}

impl SampleObserver for LiveReadout {
    fn on_sample(&mut self, sample: &Sample, _stamp: &Stamp) {
        self.last = Some(sample.clone());
    }
}
