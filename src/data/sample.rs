//! One inbound telemetry record: metric name to value.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::data::metric::Metric;
use crate::error::SampleError;

/// A single field value, kept exactly as it arrived.
///
/// Most metrics are numeric; `GEAR` may arrive as a category string. Anything else
/// (booleans, arrays, nested objects) is carried as [`SampleValue::Other`] so the
/// recorder can export it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl SampleValue {
    /// Numeric reading of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SampleValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            SampleValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            SampleValue::Other(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SampleValue::Number(n) => serde_json::Value::Number(n.clone()),
            SampleValue::Text(s) => serde_json::Value::String(s.clone()),
            SampleValue::Other(v) => v.clone(),
        }
    }
}

impl From<f64> for SampleValue {
    /// Non-finite floats have no JSON form and become `null`.
    fn from(v: f64) -> Self {
        match serde_json::Number::from_f64(v) {
            Some(n) => SampleValue::Number(n),
            None => SampleValue::Other(serde_json::Value::Null),
        }
    }
}

impl From<i64> for SampleValue {
    fn from(v: i64) -> Self {
        SampleValue::Number(v.into())
    }
}

impl From<u64> for SampleValue {
    fn from(v: u64) -> Self {
        SampleValue::Number(v.into())
    }
}

impl From<bool> for SampleValue {
    fn from(v: bool) -> Self {
        SampleValue::Other(serde_json::Value::Bool(v))
    }
}

impl From<&str> for SampleValue {
    fn from(s: &str) -> Self {
        SampleValue::Text(s.to_string())
    }
}

impl From<String> for SampleValue {
    fn from(s: String) -> Self {
        SampleValue::Text(s)
    }
}

impl From<serde_json::Value> for SampleValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Number(n) => SampleValue::Number(n),
            serde_json::Value::String(s) => SampleValue::Text(s),
            other => SampleValue::Other(other),
        }
    }
}

/// Immutable-once-received set of readings, in the order the sender wrote them.
/// Absent fields are simply not present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    fields: Vec<(String, SampleValue)>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for feeds and tests.
    pub fn with<S: Into<String>, V: Into<SampleValue>>(mut self, name: S, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field. An existing field keeps its position and takes the new value.
    pub fn insert<S: Into<String>, V: Into<SampleValue>>(&mut self, name: S, value: V) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SampleValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn metric(&self, metric: Metric) -> Option<&SampleValue> {
        self.get(metric.name())
    }

    /// Value plotted for `metric`: its numeric reading, or `0.0` when absent or non-numeric.
    ///
    /// Absent metrics still produce a point so every panel advances at the sample rate.
    pub fn chart_value(&self, metric: Metric) -> f64 {
        self.metric(metric).and_then(SampleValue::as_f64).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse one JSON object. `null` fields count as absent; everything else is kept.
    pub fn from_json(text: &str) -> Result<Sample, SampleError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Sample::try_from(value)
    }
}

impl TryFrom<serde_json::Value> for Sample {
    type Error = SampleError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(map) = value else {
            return Err(SampleError::NotAnObject);
        };
        let mut sample = Sample::new();
        for (name, v) in map {
            if v.is_null() {
                continue;
            }
            sample.insert(name, v);
        }
        Ok(sample)
    }
}

impl Serialize for Sample {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Sample::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_are_absent() {
        let s = Sample::from_json(r#"{"RPM": 2500, "SPEED": null}"#).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.metric(Metric::Speed).is_none());
        assert_eq!(s.chart_value(Metric::Speed), 0.0);
    }

    #[test]
    fn gear_may_be_a_string() {
        let s = Sample::from_json(r#"{"GEAR": "3"}"#).unwrap();
        assert_eq!(s.metric(Metric::Gear), Some(&SampleValue::Text("3".into())));
        assert_eq!(s.chart_value(Metric::Gear), 3.0);

        let s = Sample::from_json(r#"{"GEAR": "N"}"#).unwrap();
        assert_eq!(s.chart_value(Metric::Gear), 0.0);
    }

    #[test]
    fn extension_fields_are_kept() {
        let s = Sample::from_json(r#"{"RPM": 900, "OIL_TEMP": 88.5}"#).unwrap();
        assert_eq!(s.get("OIL_TEMP"), Some(&SampleValue::from(88.5)));
    }

    #[test]
    fn values_are_kept_verbatim_in_sender_order() {
        let s = Sample::from_json(r#"{"RPM": 3000, "ODO": 9007199254740993, "MIL": true, "DTC": ["P0300"]}"#)
            .unwrap();
        let names: Vec<&str> = s.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["RPM", "ODO", "MIL", "DTC"]);
        assert_eq!(s.get("RPM"), Some(&SampleValue::from(3000_i64)));
        assert_eq!(s.get("ODO"), Some(&SampleValue::from(9_007_199_254_740_993_u64)));
        assert_eq!(s.get("MIL"), Some(&SampleValue::from(true)));
        assert_eq!(s.get("DTC").map(SampleValue::to_json), Some(serde_json::json!(["P0300"])));
        assert_eq!(s.chart_value(Metric::Rpm), 3000.0);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"RPM":3000,"ODO":9007199254740993,"MIL":true,"DTC":["P0300"]}"#);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut s = Sample::new().with("RPM", 1_i64).with("SPEED", 2_i64);
        s.insert("RPM", 5_i64);
        let names: Vec<&str> = s.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["RPM", "SPEED"]);
        assert_eq!(s.chart_value(Metric::Rpm), 5.0);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(Sample::from_json("[1,2]"), Err(SampleError::NotAnObject)));
        assert!(matches!(Sample::from_json("{"), Err(SampleError::Json(_))));
    }
}
