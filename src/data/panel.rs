//! A single chart slot: selected metric, rolling buffer, renderer.

use crate::clock::Stamp;
use crate::data::metric::Metric;
use crate::data::sample::Sample;
use crate::data::window::RollingBuffer;
use crate::error::MetricError;

/// Drawing capability for one chart.
///
/// `render` always receives the full buffer contents, oldest first, and must draw
/// them without animation.
pub trait ChartRenderer {
    fn render(&mut self, labels: &[String], values: &[f64]);

    /// Called when the panel switches to another metric.
    fn set_title(&mut self, _metric: Metric) {}
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ChartRenderer for NullRenderer {
    fn render(&mut self, _labels: &[String], _values: &[f64]) {}
}

pub struct ChartPanel<R> {
    index: usize,
    metric: Metric,
    buffer: RollingBuffer,
    renderer: R,
}

impl<R: ChartRenderer> ChartPanel<R> {
    /// New panel for slot `index`, showing that slot's default metric.
    pub fn new(index: usize, window_size: usize, mut renderer: R) -> Self {
        let metric = Metric::for_slot(index);
        renderer.set_title(metric);
        Self {
            index,
            metric,
            buffer: RollingBuffer::with_capacity(window_size),
            renderer,
        }
    }

    /// Append one point for the selected metric (`0.0` when the sample lacks it) and redraw.
    pub fn on_sample(&mut self, sample: &Sample, stamp: &Stamp) {
        let value = sample.chart_value(self.metric);
        self.buffer.append(stamp.label.as_str(), value);
        self.redraw();
    }

    /// Switch metric. History always starts over, even when re-selecting the same metric.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        self.buffer.reset();
        self.renderer.set_title(metric);
        self.redraw();
    }

    /// Validating variant of [`set_metric`](Self::set_metric); the panel is untouched on error.
    pub fn set_metric_by_name(&mut self, name: &str) -> Result<(), MetricError> {
        let metric: Metric = name.parse()?;
        self.set_metric(metric);
        Ok(())
    }

    fn redraw(&mut self) {
        let (labels, values) = self.buffer.as_slices();
        self.renderer.render(labels, values);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn buffer(&self) -> &RollingBuffer {
        &self.buffer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    #[derive(Default)]
    struct LastFrame {
        values: Vec<f64>,
        title: Option<Metric>,
        renders: usize,
    }

    impl ChartRenderer for LastFrame {
        fn render(&mut self, _labels: &[String], values: &[f64]) {
            self.values = values.to_vec();
            self.renders += 1;
        }

        fn set_title(&mut self, metric: Metric) {
            self.title = Some(metric);
        }
    }

    #[test]
    fn missing_metric_appends_zero() {
        let clock = ManualClock::new(0);
        let mut panel = ChartPanel::new(2, 40, LastFrame::default());
        assert_eq!(panel.metric(), Metric::CoolantTemp);
        panel.on_sample(&Sample::new().with("RPM", 1200.0), &clock.now());
        assert_eq!(panel.buffer().len(), 1);
        assert_eq!(panel.renderer().values, vec![0.0]);
    }

    #[test]
    fn reassignment_clears_history_and_redraws_empty() {
        let clock = ManualClock::new(0);
        let mut panel = ChartPanel::new(0, 40, LastFrame::default());
        for rpm in [800.0, 900.0, 1000.0] {
            panel.on_sample(&Sample::new().with("RPM", rpm), &clock.now());
        }
        assert_eq!(panel.buffer().len(), 3);
        panel.set_metric_by_name("SPEED").unwrap();
        assert_eq!(panel.buffer().len(), 0);
        assert_eq!(panel.metric(), Metric::Speed);
        assert_eq!(panel.renderer().title, Some(Metric::Speed));
        assert!(panel.renderer().values.is_empty());
        assert_eq!(panel.renderer().renders, 4);
    }

    #[test]
    fn invalid_metric_leaves_panel_unchanged() {
        let clock = ManualClock::new(0);
        let mut panel = ChartPanel::new(0, 40, LastFrame::default());
        panel.on_sample(&Sample::new().with("RPM", 700.0), &clock.now());
        let err = panel.set_metric_by_name("BOOST").unwrap_err();
        assert_eq!(err, MetricError::InvalidMetric("BOOST".into()));
        assert_eq!(panel.metric(), Metric::Rpm);
        assert_eq!(panel.buffer().len(), 1);
    }
}
