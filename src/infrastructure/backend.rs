use crate::config::ApiEnvConfig;
use crate::domain::errors::TransportError;
use crate::domain::forecast::{PredictionRequest, PredictionResponse};
use crate::domain::health::BackendHealth;
use crate::domain::ports::{HealthService, PredictionService, WeatherService};
use crate::domain::weather::LiveWeatherPayload;
use crate::infrastructure::core::HttpClientFactory;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// HTTP client for the forecasting backend (`/live-weather`, `/predict`,
/// `/health`).
pub struct HttpBackend {
    client: Client,
    weather_url: Url,
    predict_url: Url,
    health_url: Url,
}

impl HttpBackend {
    pub fn new(api: &ApiEnvConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClientFactory::create_client(api),
            weather_url: api.endpoint("live-weather")?,
            predict_url: api.endpoint("predict")?,
            health_url: api.endpoint("health")?,
        })
    }

    async fn read_body(response: Response) -> Result<(u16, Vec<u8>), TransportError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl WeatherService for HttpBackend {
    async fn live_weather(&self) -> Result<LiveWeatherPayload, TransportError> {
        let response = self
            .client
            .get(self.weather_url.clone())
            .send()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        let (status, body) = Self::read_body(response).await?;
        decode_success_body(status, &body)
    }
}

#[async_trait]
impl PredictionService for HttpBackend {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, TransportError> {
        let response = self
            .client
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        let (status, body) = Self::read_body(response).await?;
        decode_prediction_body(status, &body)
    }
}

#[async_trait]
impl HealthService for HttpBackend {
    async fn health(&self) -> Result<BackendHealth, TransportError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        let (status, body) = Self::read_body(response).await?;
        decode_success_body(status, &body)
    }
}

/// Decodes a body that is only meaningful on a 2xx status.
pub fn decode_success_body<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<T, TransportError> {
    if !(200..300).contains(&status) {
        debug!(
            "Backend answered {}: {}",
            status,
            String::from_utf8_lossy(body)
        );
        return Err(TransportError::Status { status });
    }
    serde_json::from_slice(body).map_err(|e| TransportError::malformed(e.to_string()))
}

/// Decodes a `/predict` body. The backend reports rejected inputs with an
/// error status and an `{error}` body, so any well-formed JSON object is
/// returned regardless of status. Only an undecodable body is a failure.
pub fn decode_prediction_body(status: u16, body: &[u8]) -> Result<PredictionResponse, TransportError> {
    match serde_json::from_slice::<PredictionResponse>(body) {
        Ok(response) => Ok(response),
        Err(_) if !(200..300).contains(&status) => Err(TransportError::Status { status }),
        Err(e) => Err(TransportError::malformed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_success_body() {
        let response =
            decode_prediction_body(200, br#"{"predicted_load": 6123.45, "unit": "MW"}"#).unwrap();
        assert_eq!(response.predicted_load, Some(6123.45));
        assert_eq!(response.unit.as_deref(), Some("MW"));
    }

    #[test]
    fn test_prediction_error_status_with_json_is_domain_failure() {
        let response =
            decode_prediction_body(500, br#"{"error": "Prediction failed"}"#).unwrap();
        assert_eq!(response.predicted_load, None);
        assert_eq!(response.error.as_deref(), Some("Prediction failed"));
    }

    #[test]
    fn test_prediction_non_json_is_transport_failure() {
        let err = decode_prediction_body(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, TransportError::Status { status: 502 });

        let err = decode_prediction_body(200, b"not json").unwrap_err();
        assert!(matches!(err, TransportError::MalformedBody { .. }));
    }

    #[test]
    fn test_weather_body_requires_success_status() {
        let err = decode_success_body::<LiveWeatherPayload>(
            502,
            br#"{"error": "Weather API request failed"}"#,
        )
        .unwrap_err();
        assert_eq!(err, TransportError::Status { status: 502 });

        let payload: LiveWeatherPayload = decode_success_body(
            200,
            br#"{"temperature": 35.2, "humidity": 28.0, "timestamp": "13:45:10"}"#,
        )
        .unwrap();
        assert_eq!(payload.temperature, Some(35.2));
    }

    #[test]
    fn test_weather_malformed_body() {
        let err = decode_success_body::<LiveWeatherPayload>(200, b"{").unwrap_err();
        assert!(matches!(err, TransportError::MalformedBody { .. }));
    }

    #[test]
    fn test_backend_endpoints() {
        let api = ApiEnvConfig::from_lookup(&|_: &str| None).unwrap();
        let backend = HttpBackend::new(&api).unwrap();
        assert_eq!(backend.weather_url.as_str(), "http://127.0.0.1:5000/live-weather");
        assert_eq!(backend.predict_url.as_str(), "http://127.0.0.1:5000/predict");
        assert_eq!(backend.health_url.as_str(), "http://127.0.0.1:5000/health");
    }
}
