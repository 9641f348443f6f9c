//! Sample producers used by the binary: a synthetic demo publisher and a
//! newline-delimited JSON reader.

use std::io::BufRead;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::data::metric::Metric;
use crate::data::sample::Sample;
use crate::error::SinkError;
use crate::sink::SampleSink;

/// Publish period of the demo feed.
pub const DEMO_INTERVAL: Duration = Duration::from_millis(500);

/// Synthetic drive cycle at `t` seconds since start.
pub fn demo_sample(t: f64) -> Sample {
    // 40 s accelerate/cruise/brake cycle.
    let phase = (t / 40.0 * std::f64::consts::TAU).sin() * 0.5 + 0.5;
    let speed = 110.0 * phase;
    let gear = match speed {
        s if s < 1.0 => 0_i64,
        s if s < 20.0 => 1,
        s if s < 40.0 => 2,
        s if s < 60.0 => 3,
        s if s < 85.0 => 4,
        _ => 5,
    };
    let rpm = 800.0 + speed * 45.0 + (t * 3.0).sin() * 150.0;
    let throttle = (phase * 60.0 + (t * 0.7).cos() * 10.0).clamp(0.0, 100.0);
    Sample::new()
        .with(Metric::Rpm.name(), rpm.max(0.0))
        .with(Metric::Speed.name(), speed)
        .with(Metric::CoolantTemp.name(), (20.0 + t * 2.0).min(90.0))
        .with(Metric::ThrottlePos.name(), throttle)
        .with(Metric::FuelLevel.name(), (75.0 - t * 0.01).max(0.0))
        .with(Metric::Gear.name(), gear)
        .with(Metric::Turbo.name(), 100.0 + throttle * 1.2)
}

/// Publish [`demo_sample`]s every `interval` until the receiving side goes away.
pub fn spawn_demo_feed(sink: SampleSink, interval: Duration) -> JoinHandle<()> {
    std::thread::spawn(move || {
        tracing::info!(interval_ms = interval.as_millis() as u64, "demo feed running");
        if sink.connected().is_err() {
            return;
        }
        let start = Instant::now();
        loop {
            let t = start.elapsed().as_secs_f64();
            if sink.send_sample(demo_sample(t)).is_err() {
                break;
            }
            std::thread::sleep(interval);
        }
        tracing::debug!("demo feed stopped");
    })
}

/// Read one JSON sample per line from `reader`, blocking until EOF.
///
/// Blank lines are ignored and malformed lines are logged and skipped. Returns the
/// number of samples sent, or `Closed` if the dashboard went away first.
pub fn pump_lines<B: BufRead>(reader: B, sink: &SampleSink) -> Result<u64, SinkError> {
    sink.connected()?;
    let mut sent = 0u64;
    for (lineno, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "input read failed, stopping line feed");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match sink.send_json(line) {
            Ok(()) => sent += 1,
            Err(SinkError::Sample(e)) => {
                tracing::warn!(line = lineno + 1, error = %e, "skipping malformed sample");
            }
            Err(SinkError::Closed) => return Err(SinkError::Closed),
        }
    }
    sink.disconnected()?;
    Ok(sent)
}

/// Run [`pump_lines`] on a background thread.
pub fn spawn_line_feed<B>(reader: B, sink: SampleSink) -> JoinHandle<()>
where
    B: BufRead + Send + 'static,
{
    std::thread::spawn(move || match pump_lines(reader, &sink) {
        Ok(n) => tracing::info!(samples = n, "line feed reached end of input"),
        Err(e) => tracing::debug!(error = %e, "line feed stopped"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::channel_samples;

    #[test]
    fn demo_sample_has_every_metric() {
        let s = demo_sample(12.5);
        for m in Metric::ALL {
            assert!(s.metric(m).is_some(), "missing {m}");
        }
        assert!(s.chart_value(Metric::Speed) >= 0.0);
    }

    #[test]
    fn line_feed_skips_bad_lines() {
        let input = "{\"RPM\": 1000}\n\nnot json\n{\"SPEED\": 50}\n";
        let (sink, mut stream) = channel_samples();
        let sent = pump_lines(input.as_bytes(), &sink).unwrap();
        assert_eq!(sent, 2);
        let mut got = Vec::new();
        stream.pump(|s| got.push(s.clone()));
        assert_eq!(got.len(), 2);
        assert_eq!(got[1].chart_value(Metric::Speed), 50.0);
        assert!(!stream.is_connected());
    }

    #[test]
    fn line_feed_reports_closed_stream() {
        let (sink, stream) = channel_samples();
        drop(stream);
        let err = pump_lines("{\"RPM\": 1}\n".as_bytes(), &sink).unwrap_err();
        assert!(matches!(err, SinkError::Closed));
    }
}
