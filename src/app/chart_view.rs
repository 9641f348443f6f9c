//! egui renderer for one chart panel.

use egui::Color32;
use egui_plot::{Line, Plot};

use crate::data::metric::Metric;
use crate::data::panel::ChartRenderer;

const LINE_COLOR: Color32 = Color32::from_rgb(0x58, 0xa6, 0xff);
const TICK_COLOR: Color32 = Color32::from_rgb(0xc9, 0xd1, 0xd9);

/// Holds the last frame handed to [`ChartRenderer::render`] and draws it with `egui_plot`.
///
/// Points are placed at their buffer index so the chart always spans the whole
/// window regardless of sample timing, matching a category time axis.
#[derive(Debug, Default)]
pub struct PlotView {
    title: String,
    points: Vec<[f64; 2]>,
    last_label: Option<String>,
}

impl ChartRenderer for PlotView {
    fn render(&mut self, labels: &[String], values: &[f64]) {
        self.points.clear();
        self.points
            .extend(values.iter().enumerate().map(|(i, v)| [i as f64, *v]));
        self.last_label = labels.last().cloned();
    }

    fn set_title(&mut self, metric: Metric) {
        self.title = metric.name().to_string();
    }
}

impl PlotView {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Draw the chart into `ui` using `height` pixels. No animation, no interaction.
    pub fn show(&self, ui: &mut egui::Ui, id: impl std::hash::Hash, height: f32) {
        let plot = Plot::new(id)
            .height(height)
            .show_axes([false, true])
            .show_x(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .y_axis_formatter(|y, _range| {
                let v = y.value;
                if v.abs() >= 100.0 { format!("{v:.0}") } else { format!("{v:.1}") }
            });
        plot.show(ui, |plot_ui| {
            if !self.points.is_empty() {
                plot_ui.line(
                    Line::new(self.title.clone(), self.points.clone())
                        .color(LINE_COLOR)
                        .width(2.0),
                );
            }
        });
        if let Some(label) = &self.last_label {
            ui.label(egui::RichText::new(label).small().color(TICK_COLOR));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_points() {
        let mut view = PlotView::default();
        view.set_title(Metric::Turbo);
        view.render(&["a".into(), "b".into()], &[1.0, 2.0]);
        assert_eq!(view.point_count(), 2);
        view.render(&[], &[]);
        assert_eq!(view.point_count(), 0);
        assert_eq!(view.title(), "TURBO");
    }
}
