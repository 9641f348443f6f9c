//! OBD dashboard crate root: re-exports and module wiring.
//!
//! A live telemetry client that charts vehicle sensor samples in a fixed grid of
//! rolling-window panels and records raw sessions for JSON export.
//!
//! - `sink`: sample channel and the observer trait
//! - `data`: metrics, samples, rolling buffers, panels, grid, recorder, export
//! - `dashboard`: composition root that fans each sample out
//! - `config`: dashboard configuration (YAML-loadable)
//! - `feed`: demo and line-delimited JSON producers
//! - `app`: egui/eframe front end

pub mod app;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod feed;
pub mod sink;

// Public re-exports for a compact external API
pub use app::{run_dashboard, DashboardApp, PlotView};
pub use clock::{Clock, ManualClock, Stamp, SystemClock};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, RecorderTransition};
pub use data::grid::ChartGrid;
pub use data::metric::Metric;
pub use data::panel::{ChartPanel, ChartRenderer};
pub use data::recorder::{RecorderState, SessionRecorder};
pub use data::sample::{Sample, SampleValue};
pub use error::{ConfigError, DashboardError, ExportError, MetricError, SampleError, SinkError};
pub use sink::{channel_samples, SampleObserver, SampleSink, SampleStream, StreamEvent};
