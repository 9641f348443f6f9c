//! Composition root: owns the chart grid, the live readout and the session
//! recorder, and fans every incoming sample out to them.

use crate::clock::{Clock, Stamp, SystemClock};
use crate::config::DashboardConfig;
use crate::data::export::{export_session, ExportTarget};
use crate::data::grid::ChartGrid;
use crate::data::metric::Metric;
use crate::data::panel::ChartRenderer;
use crate::data::readout::LiveReadout;
use crate::data::recorder::{SessionLog, SessionRecorder};
use crate::data::sample::Sample;
use crate::error::{DashboardError, ExportError};
use crate::sink::SampleObserver;

/// Outcome of a recorder start/stop request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderTransition {
    Started,
    /// `start` while already recording; the buffer is untouched.
    AlreadyRecording,
    /// Recording stopped. `exported` holds the export location when anything was captured.
    Stopped { exported: Option<String> },
    /// `stop` while idle; nothing happened.
    AlreadyIdle,
}

pub struct Dashboard<R> {
    grid: ChartGrid<R>,
    readout: LiveReadout,
    recorder: SessionRecorder,
    clock: Box<dyn Clock>,
    export: Box<dyn ExportTarget>,
    /// Session whose export failed with an I/O error, kept apart from the recorder.
    pending_export: Option<SessionLog>,
    samples_seen: u64,
}

impl<R: ChartRenderer> Dashboard<R> {
    /// Build a dashboard with `config.panel_count` charts, stamping samples with the system clock.
    pub fn new<F>(config: &DashboardConfig, make_renderer: F, export: Box<dyn ExportTarget>) -> Self
    where
        F: FnMut(usize) -> R,
    {
        Self::with_clock(config, make_renderer, export, Box::new(SystemClock))
    }

    pub fn with_clock<F>(
        config: &DashboardConfig,
        make_renderer: F,
        export: Box<dyn ExportTarget>,
        clock: Box<dyn Clock>,
    ) -> Self
    where
        F: FnMut(usize) -> R,
    {
        Self {
            grid: ChartGrid::new(config.panel_count, config.window_size, make_renderer),
            readout: LiveReadout::default(),
            recorder: SessionRecorder::new(),
            clock,
            export,
            pending_export: None,
            samples_seen: 0,
        }
    }

    /// Process one sample: stamp it once, then update charts, readouts and (if active) the recorder.
    pub fn on_sample(&mut self, sample: &Sample) {
        let stamp: Stamp = self.clock.now();
        let observers: [&mut dyn SampleObserver; 3] =
            [&mut self.grid, &mut self.readout, &mut self.recorder];
        for observer in observers {
            observer.on_sample(sample, &stamp);
        }
        self.samples_seen += 1;
    }

    /// Reassign the metric shown by panel `index`. On error nothing changes.
    pub fn set_panel_metric(&mut self, index: usize, name: &str) -> Result<(), DashboardError> {
        self.grid.set_panel_metric(index, name).inspect_err(|e| {
            tracing::warn!(panel = index, metric = name, error = %e, "rejected metric reassignment");
        })
    }

    pub fn set_panel_metric_typed(&mut self, index: usize, metric: Metric) -> Result<(), DashboardError> {
        self.grid.set_panel_metric_typed(index, metric)
    }

    /// Start recording when idle, otherwise stop and export.
    pub fn toggle_recording(&mut self) -> Result<RecorderTransition, DashboardError> {
        if self.recorder.is_recording() {
            self.stop_recording()
        } else {
            Ok(self.start_recording())
        }
    }

    pub fn start_recording(&mut self) -> RecorderTransition {
        if self.recorder.start() {
            tracing::info!("recording started");
            RecorderTransition::Started
        } else {
            RecorderTransition::AlreadyRecording
        }
    }

    /// Stop recording and export the session if it captured anything.
    ///
    /// The recorder always ends `Idle` with an empty buffer. A cancelled export
    /// discards the session. Any other export failure parks it as the pending
    /// export, which only [`Dashboard::retry_export`] sends out again.
    pub fn stop_recording(&mut self) -> Result<RecorderTransition, DashboardError> {
        if !self.recorder.is_recording() {
            return Ok(RecorderTransition::AlreadyIdle);
        }
        let Some(log) = self.recorder.stop() else {
            tracing::info!("recording stopped, nothing captured");
            return Ok(RecorderTransition::Stopped { exported: None });
        };
        match export_session(self.export.as_mut(), &log) {
            Ok(location) => {
                tracing::info!(records = log.len(), location = %location, "session exported");
                Ok(RecorderTransition::Stopped { exported: Some(location) })
            }
            Err(ExportError::Cancelled) => {
                tracing::warn!(records = log.len(), "session export cancelled, recording discarded");
                Err(ExportError::Cancelled.into())
            }
            Err(e) => {
                tracing::error!(records = log.len(), error = %e, "session export failed");
                if let Some(old) = self.pending_export.replace(log) {
                    tracing::warn!(records = old.len(), "dropping older unsaved session");
                }
                Err(e.into())
            }
        }
    }

    /// Session left over from a failed export, if any.
    pub fn pending_export(&self) -> Option<&SessionLog> {
        self.pending_export.as_ref()
    }

    /// Export the pending session again. Returns `Ok(None)` when nothing is pending.
    ///
    /// On failure (including a cancelled dialog) the session stays pending.
    pub fn retry_export(&mut self) -> Result<Option<String>, DashboardError> {
        let Some(log) = self.pending_export.take() else {
            return Ok(None);
        };
        match export_session(self.export.as_mut(), &log) {
            Ok(location) => {
                tracing::info!(records = log.len(), location = %location, "pending session exported");
                Ok(Some(location))
            }
            Err(e) => {
                tracing::warn!(records = log.len(), error = %e, "pending session export failed");
                self.pending_export = Some(log);
                Err(e.into())
            }
        }
    }

    /// Drop the pending session without exporting it.
    pub fn discard_pending_export(&mut self) -> Option<SessionLog> {
        let log = self.pending_export.take();
        if let Some(log) = &log {
            tracing::info!(records = log.len(), "pending session discarded");
        }
        log
    }

    pub fn set_export_target(&mut self, export: Box<dyn ExportTarget>) {
        self.export = export;
    }

    pub fn grid(&self) -> &ChartGrid<R> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut ChartGrid<R> {
        &mut self.grid
    }

    pub fn readout(&self) -> &LiveReadout {
        &self.readout
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    pub fn status_text(&self) -> &'static str {
        self.recorder.status_text()
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }
}
