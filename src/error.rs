//! Error types shared across the dashboard core.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected metric assignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("unrecognized metric name: {0:?}")]
    InvalidMetric(String),
}

/// Failure to turn an inbound payload into a [`Sample`](crate::data::sample::Sample).
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("malformed sample JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sample payload must be a JSON object")]
    NotAnObject,
}

/// Failure to push an event into the sample channel.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error("sample stream receiver was dropped")]
    Closed,
}

/// Failure while writing a recorded session.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize session log: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("export cancelled by user")]
    Cancelled,
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("HOME is not set")]
    NoHome,
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

/// Errors surfaced by [`Dashboard`](crate::dashboard::Dashboard) operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("panel index {index} out of range (grid has {count} panels)")]
    PanelOutOfRange { index: usize, count: usize },
    #[error("session export failed: {0}")]
    Export(#[from] ExportError),
}
