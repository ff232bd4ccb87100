use crate::domain::forecast::PredictionDisplay;
use crate::domain::ports::{ChartSurface, DashboardView};
use crate::domain::reveal::Section;
use tracing::info;

/// Renders dashboard effects as log lines, for the headless CLI.
#[derive(Debug, Default)]
pub struct LogView;

impl DashboardView for LogView {
    fn show_weather_charts(&self) {
        info!("[view] weather charts have data");
    }

    fn set_results_visible(&self, visible: bool) {
        info!(
            "[view] forecast and chart sections {}",
            if visible { "shown" } else { "hidden" }
        );
    }

    fn show_prediction(&self, prediction: &PredictionDisplay) {
        match (&prediction.unit, prediction.is_error) {
            (Some(unit), false) => info!("[view] predicted load: {} {}", prediction.text, unit),
            _ => info!("[view] forecast box: {}", prediction.text),
        }
    }

    fn scroll_into_view(&self, section: Section) {
        info!("[view] scroll to {:?} section", section);
    }
}

/// Logs the latest point and window size of one chart on every redraw.
#[derive(Debug)]
pub struct LogSurface {
    name: String,
    unit: &'static str,
}

impl LogSurface {
    pub fn new(name: &str, unit: &'static str) -> Self {
        Self {
            name: name.to_string(),
            unit,
        }
    }
}

impl ChartSurface for LogSurface {
    fn redraw(&self, labels: &[String], values: &[f64]) {
        if let (Some(label), Some(value)) = (labels.last(), values.last()) {
            info!(
                "[{}] {} = {:.2} {} ({} points)",
                self.name,
                label,
                value,
                self.unit,
                values.len()
            );
        }
    }
}
