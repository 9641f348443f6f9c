//! Native egui front end.
//!
//! | Sub-module         | Responsibility |
//! | ------------------ | -------------- |
//! | [`chart_view`]     | `egui_plot` renderer behind each chart panel |
//! | [`export_dialog`]  | Save-dialog export target |
//! | `dashboard_app`    | [`DashboardApp`] (eframe) state and per-frame flow |
//! | `layout`           | Top bar and tab bodies |
//! | `run`              | [`run_dashboard()`] entry point |

pub mod chart_view;
mod dashboard_app;
pub mod export_dialog;
mod layout;
mod run;

pub use chart_view::PlotView;
pub use dashboard_app::{DashboardApp, Tab};
pub use export_dialog::DialogExport;
pub use run::run_dashboard;
