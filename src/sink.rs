//! Sample stream adapter: channel types for feeding samples into the dashboard.
//!
//! Producers (a transport, a demo feed, a file tailer) hold a cloneable
//! [`SampleSink`] and push [`StreamEvent`]s from any thread. The UI thread owns the
//! matching [`SampleStream`] and drains it once per frame, handing each sample to
//! the dashboard's observers in arrival order.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::clock::Stamp;
use crate::data::sample::Sample;
use crate::error::SinkError;

/// Receives every sample, synchronously and in arrival order.
pub trait SampleObserver {
    fn on_sample(&mut self, sample: &Sample, stamp: &Stamp);
}

/// Messages delivered over the sample channel.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// The upstream publisher (re)connected. Nothing is replayed.
    Connected,
    /// The upstream publisher went away. Buffers keep their contents.
    Disconnected,
    Sample(Sample),
}

/// Convenience sender for feeding samples into the dashboard.
#[derive(Clone)]
pub struct SampleSink {
    tx: Sender<StreamEvent>,
}

impl SampleSink {
    pub fn send_sample(&self, sample: Sample) -> Result<(), SinkError> {
        self.tx.send(StreamEvent::Sample(sample)).map_err(|_| SinkError::Closed)
    }

    /// Parse one JSON object and send it as a sample.
    pub fn send_json(&self, text: &str) -> Result<(), SinkError> {
        let sample = Sample::from_json(text)?;
        self.send_sample(sample)
    }

    pub fn connected(&self) -> Result<(), SinkError> {
        self.tx.send(StreamEvent::Connected).map_err(|_| SinkError::Closed)
    }

    pub fn disconnected(&self) -> Result<(), SinkError> {
        self.tx.send(StreamEvent::Disconnected).map_err(|_| SinkError::Closed)
    }
}

/// Receiving end, owned by the UI thread.
pub struct SampleStream {
    rx: Receiver<StreamEvent>,
    connected: bool,
    closed: bool,
}

impl SampleStream {
    pub fn new(rx: Receiver<StreamEvent>) -> Self {
        Self { rx, connected: false, closed: false }
    }

    /// Whether the last connection event was `Connected`.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether every sink has been dropped.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drain all pending events without blocking, calling `on_sample` for each sample.
    ///
    /// Returns the number of samples delivered.
    pub fn pump<F: FnMut(&Sample)>(&mut self, mut on_sample: F) -> usize {
        let mut delivered = 0;
        loop {
            match self.rx.try_recv() {
                Ok(StreamEvent::Sample(sample)) => {
                    on_sample(&sample);
                    delivered += 1;
                }
                Ok(StreamEvent::Connected) => {
                    tracing::info!("sample stream connected");
                    self.connected = true;
                }
                Ok(StreamEvent::Disconnected) => {
                    tracing::info!("sample stream disconnected");
                    self.connected = false;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        tracing::info!("all sample producers dropped");
                    }
                    self.closed = true;
                    self.connected = false;
                    break;
                }
            }
        }
        delivered
    }
}

/// Create a new channel pair: `(SampleSink, SampleStream)`.
pub fn channel_samples() -> (SampleSink, SampleStream) {
    let (tx, rx) = std::sync::mpsc::channel();
    (SampleSink { tx }, SampleStream::new(rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_delivers_in_order_and_tracks_connection() {
        let (sink, mut stream) = channel_samples();
        sink.connected().unwrap();
        sink.send_json(r#"{"RPM": 1}"#).unwrap();
        sink.send_json(r#"{"RPM": 2}"#).unwrap();
        let mut seen = Vec::new();
        let n = stream.pump(|s| seen.push(s.get("RPM").cloned()));
        assert_eq!(n, 2);
        assert!(stream.is_connected());
        assert_eq!(seen, vec![Some(1.0.into()), Some(2.0.into())]);

        sink.disconnected().unwrap();
        assert_eq!(stream.pump(|_| {}), 0);
        assert!(!stream.is_connected());
    }

    #[test]
    fn bad_json_is_rejected_at_the_sink() {
        let (sink, mut stream) = channel_samples();
        assert!(matches!(sink.send_json("42"), Err(SinkError::Sample(_))));
        assert_eq!(stream.pump(|_| {}), 0);
    }

    #[test]
    fn dropping_all_sinks_closes_the_stream() {
        let (sink, mut stream) = channel_samples();
        drop(sink);
        stream.pump(|_| {});
        assert!(stream.is_closed());
    }
}
