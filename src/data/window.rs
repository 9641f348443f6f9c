//! Bounded rolling window of labelled chart points.

use std::collections::VecDeque;

/// Rolling window size used when none is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 40;

/// Bounded FIFO of `(label, value)` points backing one chart.
///
/// Labels and values are kept in two parallel deques so a renderer can be handed
/// plain slices without copying.
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    labels: VecDeque<String>,
    values: VecDeque<f64>,
    capacity: usize,
}

impl Default for RollingBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_SIZE)
    }
}

impl RollingBuffer {
    /// `capacity` is clamped to at least one point.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity + 1),
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push a point to the tail, evicting the oldest one if the window overflowed.
    pub fn append<S: Into<String>>(&mut self, label: S, value: f64) {
        self.labels.push_back(label.into());
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.labels.pop_front();
            self.values.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.labels.clear();
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<(&str, f64)> {
        match (self.labels.back(), self.values.back()) {
            (Some(l), Some(v)) => Some((l.as_str(), *v)),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    /// Full contents as contiguous `(labels, values)` slices, oldest first.
    pub fn as_slices(&mut self) -> (&[String], &[f64]) {
        (self.labels.make_contiguous(), self.values.make_contiguous())
    }
}
