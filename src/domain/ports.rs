use crate::domain::errors::TransportError;
use crate::domain::forecast::{PredictionDisplay, PredictionRequest, PredictionResponse};
use crate::domain::health::BackendHealth;
use crate::domain::reveal::Section;
use crate::domain::weather::LiveWeatherPayload;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn live_weather(&self) -> Result<LiveWeatherPayload, TransportError>;
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictionRequest)
    -> Result<PredictionResponse, TransportError>;
}

#[async_trait]
pub trait HealthService: Send + Sync {
    async fn health(&self) -> Result<BackendHealth, TransportError>;
}

/// Whatever draws a time series. Called synchronously after every append with
/// index-aligned slices of equal length.
pub trait ChartSurface: Send + Sync {
    fn redraw(&self, labels: &[String], values: &[f64]);
}

/// Optional UI binding for the dashboard's visibility effects.
///
/// Implementations own the question of whether an element exists; when it does
/// not, the call is a no-op. The dashboard core never checks.
pub trait DashboardView: Send + Sync {
    /// Hide the "waiting for data" placeholder and switch the weather
    /// container to its has-data mode.
    fn show_weather_charts(&self);

    /// Show (and mark revealed) or hide the forecast and chart sections.
    fn set_results_visible(&self, visible: bool);

    fn show_prediction(&self, display: &PredictionDisplay);

    fn scroll_into_view(&self, section: Section);
}

/// View binding for a dashboard with no visual elements at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopView;

impl DashboardView for NoopView {
    fn show_weather_charts(&self) {}
    fn set_results_visible(&self, _visible: bool) {}
    fn show_prediction(&self, _display: &PredictionDisplay) {}
    fn scroll_into_view(&self, _section: Section) {}
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum ViewCall {
        ShowWeatherCharts,
        ResultsVisible(bool),
        Prediction(PredictionDisplay),
        Scroll(Section),
    }

    #[derive(Default)]
    pub struct RecordingView {
        calls: Mutex<Vec<ViewCall>>,
    }

    impl RecordingView {
        pub fn calls(&self) -> Vec<ViewCall> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: ViewCall) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl DashboardView for RecordingView {
        fn show_weather_charts(&self) {
            self.push(ViewCall::ShowWeatherCharts);
        }
        fn set_results_visible(&self, visible: bool) {
            self.push(ViewCall::ResultsVisible(visible));
        }
        fn show_prediction(&self, display: &PredictionDisplay) {
            self.push(ViewCall::Prediction(display.clone()));
        }
        fn scroll_into_view(&self, section: Section) {
            self.push(ViewCall::Scroll(section));
        }
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        frames: Mutex<Vec<(Vec<String>, Vec<f64>)>>,
    }

    impl RecordingSurface {
        pub fn redraw_count(&self) -> usize {
            self.frames.lock().unwrap().len()
        }

        pub fn last_frame(&self) -> (Vec<String>, Vec<f64>) {
            self.frames.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    impl ChartSurface for RecordingSurface {
        fn redraw(&self, labels: &[String], values: &[f64]) {
            self.frames
                .lock()
                .unwrap()
                .push((labels.to_vec(), values.to_vec()));
        }
    }
}
