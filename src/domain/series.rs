use crate::domain::ports::ChartSurface;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Number of points kept by every dashboard chart.
pub const SERIES_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Fixed-capacity rolling buffer of (label, value) pairs feeding one chart.
///
/// Appends go to the tail; once the buffer is full the oldest point is evicted
/// from the head, so the window always holds the most recent `capacity`
/// insertions in chronological order. Labels are free-form and may repeat.
pub struct TimeSeriesWindow {
    name: String,
    capacity: usize,
    points: VecDeque<SeriesPoint>,
    surface: Option<Arc<dyn ChartSurface>>,
}

impl TimeSeriesWindow {
    /// Creates an unbound window. A capacity of zero is treated as one.
    pub fn new(name: &str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name: name.to_string(),
            capacity,
            points: VecDeque::with_capacity(capacity + 1),
            surface: None,
        }
    }

    /// Creates a window that asks `surface` to redraw after every append.
    pub fn with_surface(name: &str, capacity: usize, surface: Arc<dyn ChartSurface>) -> Self {
        let mut window = Self::new(name, capacity);
        window.surface = Some(surface);
        window
    }

    pub fn append(&mut self, label: impl Into<String>, value: f64) {
        self.points.push_back(SeriesPoint {
            label: label.into(),
            value,
        });
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }

        if let Some(surface) = &self.surface {
            surface.redraw(&self.labels(), &self.values());
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }
}

impl fmt::Debug for TimeSeriesWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSeriesWindow")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("points", &self.points)
            .field("bound", &self.surface.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::recording::RecordingSurface;

    fn filled(capacity: usize, n: usize) -> TimeSeriesWindow {
        let mut window = TimeSeriesWindow::new("test", capacity);
        for i in 0..n {
            window.append(format!("t{}", i), i as f64);
        }
        window
    }

    #[test]
    fn test_window_grows_until_capacity() {
        let window = filled(5, 3);
        assert_eq!(window.len(), 3);
        assert_eq!(window.labels(), vec!["t0", "t1", "t2"]);
        assert_eq!(window.values(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_window_bound_keeps_most_recent() {
        for n in [21, 40, 57] {
            let window = filled(SERIES_CAPACITY, n);
            assert_eq!(window.len(), SERIES_CAPACITY);

            let expected: Vec<f64> = ((n - SERIES_CAPACITY)..n).map(|i| i as f64).collect();
            assert_eq!(window.values(), expected);
            assert_eq!(window.latest().map(|p| p.label.clone()), Some(format!("t{}", n - 1)));
        }
    }

    #[test]
    fn test_fifo_eviction_drops_exactly_one() {
        let mut window = TimeSeriesWindow::new("fifo", 3);
        window.append("a", 1.0);
        window.append("b", 2.0);
        window.append("c", 3.0);
        window.append("d", 4.0);

        let points: Vec<_> = window.points().cloned().collect();
        assert_eq!(
            points,
            vec![
                SeriesPoint { label: "b".into(), value: 2.0 },
                SeriesPoint { label: "c".into(), value: 3.0 },
                SeriesPoint { label: "d".into(), value: 4.0 },
            ]
        );
    }

    #[test]
    fn test_duplicate_labels_are_kept() {
        let mut window = TimeSeriesWindow::new("dup", 4);
        window.append("12:00:00", 1.0);
        window.append("12:00:00", 2.0);
        assert_eq!(window.labels(), vec!["12:00:00", "12:00:00"]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let window = filled(0, 3);
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.values(), vec![2.0]);
    }

    #[test]
    fn test_append_redraws_bound_surface() {
        let surface = Arc::new(RecordingSurface::default());
        let mut window = TimeSeriesWindow::with_surface("load", 2, surface.clone());

        window.append("a", 1.0);
        window.append("b", 2.0);
        window.append("c", 3.0);

        assert_eq!(surface.redraw_count(), 3);
        let (labels, values) = surface.last_frame();
        assert_eq!(labels, vec!["b", "c"]);
        assert_eq!(values, vec![2.0, 3.0]);
    }
}
