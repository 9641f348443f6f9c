//! Fixed grid of chart panels fed from one sample stream.

use crate::clock::Stamp;
use crate::data::metric::Metric;
use crate::data::panel::{ChartPanel, ChartRenderer};
use crate::data::sample::Sample;
use crate::error::DashboardError;
use crate::sink::SampleObserver;

/// Number of chart slots when none is configured.
pub const DEFAULT_PANEL_COUNT: usize = 6;

/// Fixed-size collection of independently configured chart panels.
///
/// The panel count is set at construction and never changes afterwards.
pub struct ChartGrid<R> {
    panels: Vec<ChartPanel<R>>,
}

impl<R: ChartRenderer> ChartGrid<R> {
    /// Build `panel_count` panels; `make_renderer` is called once per slot index.
    pub fn new<F>(panel_count: usize, window_size: usize, mut make_renderer: F) -> Self
    where
        F: FnMut(usize) -> R,
    {
        let panels = (0..panel_count)
            .map(|i| ChartPanel::new(i, window_size, make_renderer(i)))
            .collect();
        Self { panels }
    }

    /// Feed one sample to every panel, in slot order.
    pub fn broadcast(&mut self, sample: &Sample, stamp: &Stamp) {
        for panel in self.panels.iter_mut() {
            panel.on_sample(sample, stamp);
        }
    }

    pub fn set_panel_metric(&mut self, index: usize, name: &str) -> Result<(), DashboardError> {
        let count = self.panels.len();
        let panel = self
            .panels
            .get_mut(index)
            .ok_or(DashboardError::PanelOutOfRange { index, count })?;
        panel.set_metric_by_name(name)?;
        Ok(())
    }

    /// Typed variant used by the UI, whose choices are always valid metrics.
    pub fn set_panel_metric_typed(&mut self, index: usize, metric: Metric) -> Result<(), DashboardError> {
        let count = self.panels.len();
        let panel = self
            .panels
            .get_mut(index)
            .ok_or(DashboardError::PanelOutOfRange { index, count })?;
        panel.set_metric(metric);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel(&self, index: usize) -> Option<&ChartPanel<R>> {
        self.panels.get(index)
    }

    pub fn panels(&self) -> &[ChartPanel<R>] {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut ChartPanel<R>> {
        self.panels.iter_mut()
    }
}

impl<R: ChartRenderer> SampleObserver for ChartGrid<R> {
    fn on_sample(&mut self, sample: &Sample, stamp: &Stamp) {
        self.broadcast(sample, stamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::data::panel::NullRenderer;

    #[test]
    fn default_metrics_cycle_by_slot() {
        let grid = ChartGrid::new(9, 40, |_| NullRenderer);
        let metrics: Vec<Metric> = grid.panels().iter().map(|p| p.metric()).collect();
        assert_eq!(metrics[..7], Metric::ALL);
        assert_eq!(metrics[7], Metric::Rpm);
        assert_eq!(metrics[8], Metric::Speed);
    }

    #[test]
    fn out_of_range_panel_is_rejected() {
        let mut grid = ChartGrid::new(6, 40, |_| NullRenderer);
        let err = grid.set_panel_metric(6, "RPM").unwrap_err();
        assert!(matches!(err, DashboardError::PanelOutOfRange { index: 6, count: 6 }));
    }

    #[test]
    fn reassigning_one_panel_leaves_others_alone() {
        let clock = ManualClock::new(0);
        let mut grid = ChartGrid::new(3, 40, |_| NullRenderer);
        grid.broadcast(&Sample::new().with("RPM", 1.0), &clock.now());
        grid.set_panel_metric(1, "TURBO").unwrap();
        assert_eq!(grid.panel(0).unwrap().buffer().len(), 1);
        assert_eq!(grid.panel(1).unwrap().buffer().len(), 0);
        assert_eq!(grid.panel(2).unwrap().buffer().len(), 1);
    }
}
