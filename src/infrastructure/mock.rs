use crate::domain::errors::TransportError;
use crate::domain::forecast::{PredictionRequest, PredictionResponse};
use crate::domain::health::BackendHealth;
use crate::domain::ports::{HealthService, PredictionService, WeatherService};
use crate::domain::weather::{LiveWeatherPayload, clock_label};
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use std::sync::Mutex;
use tracing::info;

const BASE_LOAD_MW: f64 = 3500.0;
const MIN_LOAD_MW: f64 = 3000.0;
const MAX_LOAD_MW: f64 = 9000.0;

/// In-process stand-in for the forecasting backend, used with
/// `LOADCAST_MODE=mock`.
///
/// Weather follows a bounded random walk; predictions come from a crude
/// linear blend of the inputs, clamped to the same range as the real model.
pub struct MockBackend {
    weather: Mutex<(f64, f64)>,
}

impl MockBackend {
    pub fn new() -> Self {
        info!("Using mock forecasting backend");
        Self {
            weather: Mutex::new((31.0, 45.0)),
        }
    }

    fn next_weather(&self) -> (f64, f64) {
        let mut rng = rand::rng();
        let mut state = match self.weather.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (temperature, humidity) = *state;

        let temperature = (temperature + rng.random_range(-0.6_f64..0.6)).clamp(5.0, 48.0);
        let humidity = (humidity + rng.random_range(-2.0_f64..2.0)).clamp(10.0, 95.0);
        *state = (temperature, humidity);

        ((temperature * 100.0).round() / 100.0, (humidity * 100.0).round() / 100.0)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthetic load for a request, or `None` when the inputs are unusable.
pub fn synthetic_load(request: &PredictionRequest) -> Option<f64> {
    let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").ok()?;
    if !request.temperature.is_finite() || !request.humidity.is_finite() {
        return None;
    }

    let day_factor = if request.daytype == "weekend" { -0.04 } else { 0.02 };
    let season_factor = match request.season.as_str() {
        "summer" => 0.08,
        "monsoon" => 0.05,
        "winter" => -0.03,
        _ => 0.0,
    };

    let y = (request.temperature / 50.0) * 0.14
        + (request.humidity / 100.0) * 0.03
        + f64::from(date.month()) / 20.0 * 0.02
        + day_factor
        + season_factor;

    let load = (BASE_LOAD_MW + y * 20000.0).clamp(MIN_LOAD_MW, MAX_LOAD_MW);
    Some((load * 100.0).round() / 100.0)
}

#[async_trait]
impl WeatherService for MockBackend {
    async fn live_weather(&self) -> Result<LiveWeatherPayload, TransportError> {
        let (temperature, humidity) = self.next_weather();
        Ok(LiveWeatherPayload {
            temperature: Some(temperature),
            humidity: Some(humidity),
            timestamp: Some(serde_json::Value::String(clock_label(Local::now().time()))),
            error: None,
        })
    }
}

#[async_trait]
impl PredictionService for MockBackend {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, TransportError> {
        Ok(match synthetic_load(request) {
            Some(load) => PredictionResponse {
                predicted_load: Some(load),
                unit: Some("MW".to_string()),
                error: None,
            },
            None => PredictionResponse {
                predicted_load: None,
                unit: None,
                error: Some("Prediction failed".to_string()),
            },
        })
    }
}

#[async_trait]
impl HealthService for MockBackend {
    async fn health(&self) -> Result<BackendHealth, TransportError> {
        Ok(BackendHealth {
            status: "OK".to_string(),
            backend: Some("mock".to_string()),
            model: Some("synthetic".to_string()),
            time: Some(Local::now().to_rfc3339()),
        })
    }
}
