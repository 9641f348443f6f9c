//! Top bar and tab bodies for [`DashboardApp`].
//!
//! * **[`render_top_bar`](DashboardApp::render_top_bar)** – tab strip, record
//!   toggle, recorder status and connection indicator.
//! * **[`render_graphs_tab`](DashboardApp::render_graphs_tab)** – the chart grid
//!   with a metric selector per panel.
//! * **[`render_live_tab`](DashboardApp::render_live_tab)** – big-number readouts.
//! * **[`render_logging_tab`](DashboardApp::render_logging_tab)** – recorder
//!   controls and the last export result.

use eframe::egui;
use egui_phosphor::regular::{
    CHART_LINE, FLOPPY_DISK, GAUGE, RECORD, STOP, TABLE, TRASH, WIFI_HIGH, WIFI_SLASH,
};

use crate::data::metric::Metric;
use crate::data::readout::READOUTS;

use super::dashboard_app::{DashboardApp, FrameRequests, Tab};

const RECORDING_COLOR: egui::Color32 = egui::Color32::from_rgb(0xf8, 0x51, 0x49);

impl DashboardApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context, requests: &mut FrameRequests) {
        egui::TopBottomPanel::top("obd_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Live, format!("{GAUGE} Live"));
                ui.selectable_value(&mut self.tab, Tab::Graphs, format!("{CHART_LINE} Graphs"));
                ui.selectable_value(&mut self.tab, Tab::Logging, format!("{TABLE} Logging"));
                ui.separator();
                self.record_button(ui, requests);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.stream.is_connected() {
                        ui.label(WIFI_HIGH).on_hover_text("Connected");
                    } else {
                        ui.label(WIFI_SLASH).on_hover_text("Not connected");
                    }
                    ui.label(format!("{} samples", self.dashboard.samples_seen()));
                });
            });
        });
    }

    fn record_button(&self, ui: &mut egui::Ui, requests: &mut FrameRequests) {
        let recording = self.dashboard.recorder().is_recording();
        let (text, hint) = if recording {
            (format!("{STOP} Stop"), "Stop recording and export the session")
        } else {
            (format!("{RECORD} Record"), "Start recording raw samples")
        };
        if ui.button(text).on_hover_text(hint).clicked() {
            requests.toggle_recording = true;
        }
        let status = egui::RichText::new(self.dashboard.status_text());
        if recording {
            ui.label(status.color(RECORDING_COLOR));
        } else {
            ui.label(status);
        }
    }

    pub(super) fn render_graphs_tab(&self, ui: &mut egui::Ui, requests: &mut FrameRequests) {
        let panels = self.dashboard.grid().panels();
        let cols = if ui.available_width() < 700.0 { 2 } else { 3 };
        let rows = panels.len().div_ceil(cols).max(1);
        let spacing = ui.spacing().item_spacing.y;
        // Header row and tick label take roughly 50 px per chart.
        let chart_h = ((ui.available_height() - spacing * rows as f32) / rows as f32 - 50.0).max(60.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in panels.chunks(cols) {
                ui.columns(cols, |columns| {
                    for (col, panel) in columns.iter_mut().zip(row.iter()) {
                        col.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.strong(panel.renderer().title());
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    let mut selected = panel.metric();
                                    egui::ComboBox::from_id_salt(("panel_metric", panel.index()))
                                        .selected_text(selected.name())
                                        .show_ui(ui, |ui| {
                                            for m in Metric::ALL {
                                                ui.selectable_value(&mut selected, m, m.name());
                                            }
                                        });
                                    if selected != panel.metric() {
                                        requests.metric_changes.push((panel.index(), selected));
                                    }
                                });
                            });
                            panel.renderer().show(ui, ("panel_plot", panel.index()), chart_h);
                        });
                    }
                });
            }
        });
    }

    pub(super) fn render_live_tab(&self, ui: &mut egui::Ui) {
        let readout = self.dashboard.readout();
        ui.add_space(12.0);
        ui.horizontal_wrapped(|ui| {
            for (metric, format) in READOUTS {
                ui.group(|ui| {
                    ui.set_min_width(160.0);
                    ui.vertical_centered(|ui| {
                        ui.label(metric.name());
                        ui.label(egui::RichText::new(readout.display(metric, format)).size(40.0).strong());
                    });
                });
            }
        });
    }

    pub(super) fn render_logging_tab(&self, ui: &mut egui::Ui, requests: &mut FrameRequests) {
        let recorder = self.dashboard.recorder();
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            self.record_button(ui, requests);
        });
        ui.label(format!("{} samples captured in this session", recorder.len()));
        if let Some(msg) = &self.export_message {
            ui.separator();
            ui.label(msg);
        }
        if let Some(pending) = self.dashboard.pending_export() {
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("{} samples from a failed export are not saved", pending.len()));
                if ui.button(format!("{} Retry export", FLOPPY_DISK)).clicked() {
                    requests.retry_export = true;
                }
                if ui.button(format!("{} Discard", TRASH)).clicked() {
                    requests.discard_pending = true;
                }
            });
        }
    }
}
