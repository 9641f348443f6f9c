//! Standalone dashboard application that implements [`eframe::App`].
//!
//! Each frame drains the sample stream into the [`Dashboard`], then draws the
//! top bar and the selected tab. Metric changes and record toggles requested by
//! widgets are collected while drawing and applied afterwards.

use std::time::Duration;

use eframe::egui;

use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, RecorderTransition};
use crate::data::export::{DirectoryExport, ExportTarget};
use crate::data::metric::Metric;
use crate::sink::SampleStream;

use super::chart_view::PlotView;
use super::export_dialog::DialogExport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Live,
    #[default]
    Graphs,
    Logging,
}

/// UI requests gathered during a frame.
#[derive(Default)]
pub(super) struct FrameRequests {
    pub(super) metric_changes: Vec<(usize, Metric)>,
    pub(super) toggle_recording: bool,
    pub(super) retry_export: bool,
    pub(super) discard_pending: bool,
}

pub struct DashboardApp {
    pub(super) dashboard: Dashboard<PlotView>,
    pub(super) stream: SampleStream,
    pub(super) tab: Tab,
    /// Outcome of the last recording stop, shown in the logging tab.
    pub(super) export_message: Option<String>,
    repaint_interval: Duration,
}

impl DashboardApp {
    pub fn new(stream: SampleStream, cfg: &DashboardConfig) -> Self {
        let export: Box<dyn ExportTarget> = match &cfg.export_dir {
            Some(dir) => Box::new(DirectoryExport::new(dir)),
            None => Box::new(DialogExport::default()),
        };
        Self {
            dashboard: Dashboard::new(cfg, |_| PlotView::default(), export),
            stream,
            tab: Tab::default(),
            export_message: None,
            repaint_interval: Duration::from_millis(cfg.repaint_interval_ms.max(1)),
        }
    }

    /// Feed every pending sample into the dashboard, in arrival order.
    fn ingest(&mut self) {
        let dashboard = &mut self.dashboard;
        self.stream.pump(|sample| dashboard.on_sample(sample));
    }

    fn apply_requests(&mut self, requests: FrameRequests) {
        for (index, metric) in requests.metric_changes {
            if let Err(e) = self.dashboard.set_panel_metric_typed(index, metric) {
                tracing::warn!(panel = index, error = %e, "metric change ignored");
            }
        }
        if requests.toggle_recording {
            self.export_message = match self.dashboard.toggle_recording() {
                Ok(RecorderTransition::Stopped { exported: Some(location) }) => {
                    Some(format!("Saved {location}"))
                }
                Ok(RecorderTransition::Stopped { exported: None }) => {
                    Some("Nothing recorded".to_string())
                }
                Ok(_) => None,
                Err(e) => Some(format!("Export failed: {e}")),
            };
        }
        if requests.retry_export {
            self.export_message = match self.dashboard.retry_export() {
                Ok(Some(location)) => Some(format!("Saved {location}")),
                Ok(None) => None,
                Err(e) => Some(format!("Export failed: {e}")),
            };
        }
        if requests.discard_pending && self.dashboard.discard_pending_export().is_some() {
            self.export_message = Some("Unsaved session discarded".to_string());
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ingest();

        let mut requests = FrameRequests::default();
        self.render_top_bar(ctx, &mut requests);
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Live => self.render_live_tab(ui),
            Tab::Graphs => self.render_graphs_tab(ui, &mut requests),
            Tab::Logging => self.render_logging_tab(ui, &mut requests),
        });
        self.apply_requests(requests);

        ctx.request_repaint_after(self.repaint_interval);
    }
}
