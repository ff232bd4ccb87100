use crate::domain::forecast::{PredictionDisplay, PredictionOutcome};
use crate::domain::ports::{ChartSurface, DashboardView, NoopView};
use crate::domain::reveal::{ForecastReveal, WeatherReveal};
use crate::domain::series::TimeSeriesWindow;
use crate::domain::weather::{WeatherReading, clock_label};
use chrono::NaiveTime;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub type SharedDashboard = Arc<RwLock<Dashboard>>;

/// Surfaces the three windows redraw into. Missing surfaces are skipped.
#[derive(Default, Clone)]
pub struct ChartSurfaces {
    pub load: Option<Arc<dyn ChartSurface>>,
    pub temperature: Option<Arc<dyn ChartSurface>>,
    pub humidity: Option<Arc<dyn ChartSurface>>,
}

/// All mutable dashboard state: the three chart windows, both reveal state
/// machines and the forecast box content.
///
/// Every mutation is a single synchronous method so callers can apply one
/// completed event per lock acquisition.
pub struct Dashboard {
    load: TimeSeriesWindow,
    temperature: TimeSeriesWindow,
    humidity: TimeSeriesWindow,
    weather_reveal: WeatherReveal,
    forecast_reveal: ForecastReveal,
    prediction: PredictionDisplay,
    view: Arc<dyn DashboardView>,
}

fn window(name: &str, capacity: usize, surface: Option<Arc<dyn ChartSurface>>) -> TimeSeriesWindow {
    match surface {
        Some(surface) => TimeSeriesWindow::with_surface(name, capacity, surface),
        None => TimeSeriesWindow::new(name, capacity),
    }
}

impl Dashboard {
    pub fn new(capacity: usize, surfaces: ChartSurfaces, view: Arc<dyn DashboardView>) -> Self {
        Self {
            load: window("load", capacity, surfaces.load),
            temperature: window("temperature", capacity, surfaces.temperature),
            humidity: window("humidity", capacity, surfaces.humidity),
            weather_reveal: WeatherReveal::default(),
            forecast_reveal: ForecastReveal::default(),
            prediction: PredictionDisplay::placeholder(),
            view,
        }
    }

    /// A dashboard with no surfaces and no view.
    pub fn headless(capacity: usize) -> Self {
        Self::new(capacity, ChartSurfaces::default(), Arc::new(NoopView))
    }

    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(RwLock::new(self))
    }

    /// Appends a complete reading to both weather windows and reveals the
    /// weather charts the first time. Returns the label used.
    pub fn apply_weather(&mut self, reading: &WeatherReading, now: NaiveTime) -> String {
        let label = reading.label(now);
        self.temperature.append(label.clone(), reading.temperature);
        self.humidity.append(label.clone(), reading.humidity);

        if self.weather_reveal.reveal() {
            info!("Dashboard: first weather reading received, revealing weather charts");
            self.view.show_weather_charts();
        }

        label
    }

    /// Applies a finished prediction. Only a successful prediction touches the
    /// load window and reveals the result sections; failures just change the
    /// forecast box text. Returns true when the sections were revealed.
    pub fn apply_prediction(&mut self, outcome: &PredictionOutcome, now: NaiveTime) -> bool {
        self.set_prediction(outcome.display());

        match outcome {
            PredictionOutcome::Predicted { load_mw, .. } => {
                self.load.append(clock_label(now), *load_mw);
                if self.forecast_reveal.show() {
                    debug!("Dashboard: forecast sections HIDDEN -> SHOWN");
                }
                self.view.set_results_visible(true);
                true
            }
            PredictionOutcome::Rejected { .. } | PredictionOutcome::Failed { .. } => false,
        }
    }

    /// Clears the forecast box and hides the result sections.
    pub fn reset(&mut self) {
        self.set_prediction(PredictionDisplay::placeholder());
        if self.forecast_reveal.hide() {
            debug!("Dashboard: forecast sections SHOWN -> HIDDEN");
        }
        self.view.set_results_visible(false);
    }

    fn set_prediction(&mut self, display: PredictionDisplay) {
        self.view.show_prediction(&display);
        self.prediction = display;
    }

    pub fn view(&self) -> Arc<dyn DashboardView> {
        self.view.clone()
    }

    pub fn load(&self) -> &TimeSeriesWindow {
        &self.load
    }

    pub fn temperature(&self) -> &TimeSeriesWindow {
        &self.temperature
    }

    pub fn humidity(&self) -> &TimeSeriesWindow {
        &self.humidity
    }

    pub fn weather_reveal(&self) -> WeatherReveal {
        self.weather_reveal
    }

    pub fn forecast_reveal(&self) -> ForecastReveal {
        self.forecast_reveal
    }

    pub fn prediction(&self) -> &PredictionDisplay {
        &self.prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::recording::{RecordingSurface, RecordingView, ViewCall};
    use crate::domain::series::SERIES_CAPACITY;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn reading(temperature: f64, humidity: f64, timestamp: Option<&str>) -> WeatherReading {
        WeatherReading {
            temperature,
            humidity,
            timestamp: timestamp.map(String::from),
        }
    }

    fn predicted(load_mw: f64) -> PredictionOutcome {
        PredictionOutcome::Predicted {
            load_mw,
            unit: "MW".into(),
        }
    }

    #[test]
    fn test_weather_appends_both_windows_with_same_label() {
        let mut dashboard = Dashboard::headless(SERIES_CAPACITY);
        let label = dashboard.apply_weather(&reading(31.0, 55.0, Some("9:05:07")), at(10, 0, 0));

        assert_eq!(label, "9:05:07");
        assert_eq!(dashboard.temperature().labels(), vec!["9:05:07"]);
        assert_eq!(dashboard.temperature().values(), vec![31.0]);
        assert_eq!(dashboard.humidity().labels(), vec!["9:05:07"]);
        assert_eq!(dashboard.humidity().values(), vec![55.0]);
        assert!(dashboard.load().is_empty());
    }

    #[test]
    fn test_weather_reveal_fires_once() {
        let view = Arc::new(RecordingView::default());
        let mut dashboard = Dashboard::new(SERIES_CAPACITY, ChartSurfaces::default(), view.clone());

        dashboard.apply_weather(&reading(30.0, 40.0, None), at(10, 0, 0));
        dashboard.apply_weather(&reading(30.5, 41.0, None), at(10, 1, 0));

        assert!(dashboard.weather_reveal().is_revealed());
        let reveals = view
            .calls()
            .into_iter()
            .filter(|c| *c == ViewCall::ShowWeatherCharts)
            .count();
        assert_eq!(reveals, 1);
    }

    #[test]
    fn test_each_window_redraws_its_own_surface() {
        let temperature = Arc::new(RecordingSurface::default());
        let humidity = Arc::new(RecordingSurface::default());
        let load = Arc::new(RecordingSurface::default());
        let surfaces = ChartSurfaces {
            load: Some(load.clone()),
            temperature: Some(temperature.clone()),
            humidity: Some(humidity.clone()),
        };
        let mut dashboard = Dashboard::new(3, surfaces, Arc::new(NoopView));

        dashboard.apply_weather(&reading(30.0, 40.0, None), at(10, 0, 0));

        assert_eq!(temperature.redraw_count(), 1);
        assert_eq!(humidity.redraw_count(), 1);
        assert_eq!(load.redraw_count(), 0);
        assert_eq!(humidity.last_frame().1, vec![40.0]);
    }

    #[test]
    fn test_prediction_success_reveals_and_records() {
        let view = Arc::new(RecordingView::default());
        let mut dashboard = Dashboard::new(SERIES_CAPACITY, ChartSurfaces::default(), view.clone());

        let revealed = dashboard.apply_prediction(&predicted(5424.0), at(14, 30, 0));

        assert!(revealed);
        assert_eq!(dashboard.prediction().text, "5424");
        assert!(dashboard.prediction().has_value());
        assert_eq!(dashboard.load().values(), vec![5424.0]);
        assert_eq!(dashboard.load().labels(), vec!["14:30:00"]);
        assert_eq!(dashboard.forecast_reveal(), ForecastReveal::Shown);
        assert_eq!(view.calls().last(), Some(&ViewCall::ResultsVisible(true)));
    }

    #[test]
    fn test_prediction_failure_keeps_sections() {
        let mut dashboard = Dashboard::headless(SERIES_CAPACITY);
        dashboard.apply_prediction(&predicted(5000.0), at(9, 0, 0));

        let rejected = PredictionOutcome::Rejected {
            message: "out of range".into(),
        };
        assert!(!dashboard.apply_prediction(&rejected, at(9, 1, 0)));

        assert_eq!(dashboard.prediction().text, "out of range");
        assert!(dashboard.prediction().is_error);
        assert_eq!(dashboard.load().len(), 1);
        // Errors never hide results that are already on screen
        assert_eq!(dashboard.forecast_reveal(), ForecastReveal::Shown);
    }

    #[test]
    fn test_prediction_failure_before_success_stays_hidden() {
        let view = Arc::new(RecordingView::default());
        let mut dashboard = Dashboard::new(SERIES_CAPACITY, ChartSurfaces::default(), view.clone());

        let failed = PredictionOutcome::Failed {
            reason: "Request failed: connection refused".into(),
        };
        dashboard.apply_prediction(&failed, at(9, 0, 0));

        assert_eq!(dashboard.prediction().text, "Server error");
        assert_eq!(dashboard.forecast_reveal(), ForecastReveal::Hidden);
        assert!(dashboard.load().is_empty());
        assert!(!view.calls().iter().any(|c| matches!(c, ViewCall::ResultsVisible(_))));
    }

    #[test]
    fn test_reset_hides_and_clears() {
        let view = Arc::new(RecordingView::default());
        let mut dashboard = Dashboard::new(SERIES_CAPACITY, ChartSurfaces::default(), view.clone());
        dashboard.apply_prediction(&predicted(6100.0), at(9, 0, 0));

        dashboard.reset();

        assert_eq!(dashboard.prediction(), &PredictionDisplay::placeholder());
        assert_eq!(dashboard.forecast_reveal(), ForecastReveal::Hidden);
        // The load history survives a reset
        assert_eq!(dashboard.load().len(), 1);
        assert_eq!(view.calls().last(), Some(&ViewCall::ResultsVisible(false)));
    }
}
