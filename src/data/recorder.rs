//! Session recorder: captures raw samples between a start and a stop.

use serde::Serialize;

use crate::clock::Stamp;
use crate::data::sample::Sample;
use crate::error::ExportError;
use crate::sink::SampleObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
}

/// One captured sample and its receipt time.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub time: i64,
    pub sample: Sample,
}

impl Record {
    /// `{"time": <millis>, ...fields}` with `time` first and the fields in arrival order.
    /// A field named `time` wins over the receipt time but keeps the leading position.
    fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("time".to_string(), serde_json::Value::from(self.time));
        for (name, value) in self.sample.iter() {
            obj.insert(name.to_string(), value.to_json());
        }
        serde_json::Value::Object(obj)
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The records of one finished session, ready for export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionLog {
    pub records: Vec<Record>,
}

impl SessionLog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty-printed JSON array, two-space indent, in capture order.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(&self.records)?)
    }
}

#[derive(Debug, Default)]
pub struct SessionRecorder {
    state: RecorderState,
    records: Vec<Record>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Number of records captured in the current session.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Enter `Recording`. Returns `false` (and keeps the buffer) if already recording.
    pub fn start(&mut self) -> bool {
        if self.is_recording() {
            return false;
        }
        self.state = RecorderState::Recording;
        true
    }

    /// Leave `Recording` and hand over the captured session, if any.
    ///
    /// The recorder keeps a fresh empty buffer afterwards. Returns `None` when idle
    /// (no state change) or when nothing was captured.
    pub fn stop(&mut self) -> Option<SessionLog> {
        if !self.is_recording() {
            return None;
        }
        self.state = RecorderState::Idle;
        if self.records.is_empty() {
            return None;
        }
        Some(SessionLog { records: std::mem::take(&mut self.records) })
    }

    /// Append a sample if recording. Returns whether it was captured.
    pub fn append(&mut self, sample: &Sample, stamp: &Stamp) -> bool {
        if !self.is_recording() {
            return false;
        }
        self.records.push(Record { time: stamp.epoch_millis, sample: sample.clone() });
        true
    }

    /// Status line shown next to the record button.
    pub fn status_text(&self) -> &'static str {
        match self.state {
            RecorderState::Recording => "Logging...",
            RecorderState::Idle => "Not logging",
        }
    }
}

impl SampleObserver for SessionRecorder {
    fn on_sample(&mut self, sample: &Sample, stamp: &Stamp) {
        self.append(sample, stamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    #[test]
    fn stop_while_idle_is_noop() {
        let mut rec = SessionRecorder::new();
        assert!(rec.stop().is_none());
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    #[test]
    fn appends_only_while_recording() {
        let clock = ManualClock::new(10);
        let mut rec = SessionRecorder::new();
        assert!(!rec.append(&Sample::new().with("RPM", 1.0), &clock.now()));
        rec.start();
        assert!(rec.append(&Sample::new().with("RPM", 2.0), &clock.now()));
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn start_twice_keeps_buffer() {
        let clock = ManualClock::new(10);
        let mut rec = SessionRecorder::new();
        rec.start();
        rec.append(&Sample::new().with("RPM", 2.0), &clock.now());
        assert!(!rec.start());
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn stop_with_empty_buffer_yields_nothing() {
        let mut rec = SessionRecorder::new();
        rec.start();
        assert!(rec.stop().is_none());
        assert!(!rec.is_recording());
    }

    #[test]
    fn next_session_starts_empty() {
        let clock = ManualClock::new(10);
        let mut rec = SessionRecorder::new();
        rec.start();
        rec.append(&Sample::new().with("RPM", 2.0), &clock.now());
        let log = rec.stop().unwrap();
        assert_eq!(log.len(), 1);
        assert!(rec.is_empty());
        rec.start();
        rec.append(&Sample::new().with("RPM", 3.0), &clock.now());
        let log = rec.stop().unwrap();
        assert_eq!(log.records[0].sample.chart_value(crate::data::metric::Metric::Rpm), 3.0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn sample_time_field_overrides_receipt_time() {
        let rec = Record { time: 5, sample: Sample::new().with("RPM", 1_i64).with("time", 99.0) };
        let json = rec.to_json();
        assert_eq!(json["time"], serde_json::json!(99.0));
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["time", "RPM"]);
    }

    #[test]
    fn export_reproduces_samples_verbatim() {
        let sample =
            Sample::from_json(r#"{"RPM": 3000, "ODO": 9007199254740993, "MIL": true, "DTC": ["P0300"]}"#).unwrap();
        let log = SessionLog { records: vec![Record { time: 1000, sample }] };
        let text = String::from_utf8(log.to_json_bytes().unwrap()).unwrap();
        let expected = r#"[
  {
    "time": 1000,
    "RPM": 3000,
    "ODO": 9007199254740993,
    "MIL": true,
    "DTC": [
      "P0300"
    ]
  }
]"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn status_text_follows_state() {
        let mut rec = SessionRecorder::new();
        assert_eq!(rec.status_text(), "Not logging");
        rec.start();
        assert_eq!(rec.status_text(), "Logging...");
    }
}
