//! Top-level entry point for running the dashboard as a native window.

use eframe::egui;

use crate::config::DashboardConfig;
use crate::sink::SampleStream;

use super::dashboard_app::DashboardApp;

/// Launch the dashboard in a native window. Blocks until the window is closed.
///
/// Samples arrive through `stream`; the matching [`SampleSink`](crate::sink::SampleSink)
/// can be handed to any producer thread before calling this.
pub fn run_dashboard(stream: SampleStream, mut cfg: DashboardConfig) -> eframe::Result<()> {
    let app = DashboardApp::new(stream, &cfg);

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1280.0, 800.0));
    }

    tracing::info!(
        panels = cfg.panel_count,
        window = cfg.window_size,
        export_dir = ?cfg.export_dir,
        "starting dashboard"
    );

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )
}
