use crate::domain::errors::TransportError;
use serde::{Deserialize, Serialize};

/// Shown in the forecast box before any prediction and after a reset.
pub const PREDICTION_PLACEHOLDER: &str = "--";
/// Shown when the backend rejects a request without an error message.
pub const PREDICTION_ERROR_FALLBACK: &str = "Prediction error";
/// Shown when the backend could not be reached or answered garbage.
pub const SERVER_ERROR_TEXT: &str = "Server error";
pub const DEFAULT_LOAD_UNIT: &str = "MW";

/// The five raw form inputs, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastForm {
    pub date: String,
    pub temperature: String,
    pub humidity: String,
    pub daytype: String,
    pub season: String,
}

impl ForecastForm {
    /// Builds the wire request. Categorical fields are lowercased and numeric
    /// fields that do not parse become `NaN`; the backend does the validation.
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            date: self.date.clone(),
            temperature: parse_number(&self.temperature),
            humidity: parse_number(&self.humidity),
            daytype: self.daytype.to_lowercase(),
            season: self.season.to_lowercase(),
        }
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Body of `POST /predict`. Non-finite numbers serialize as JSON `null`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
    pub daytype: String,
    pub season: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predicted_load: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of one predict round-trip, after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// `load_mw` is already rounded to the nearest integer.
    Predicted { load_mw: f64, unit: String },
    /// Well-formed response without a prediction.
    Rejected { message: String },
    /// The request never produced a usable body.
    Failed { reason: String },
}

impl PredictionOutcome {
    /// Classifies a predict round-trip.
    ///
    /// Only a numeric `predicted_load` is a prediction. An explicit
    /// `"predicted_load": null` is a rejection like a missing field, rather
    /// than a zero load.
    pub fn from_response(result: Result<PredictionResponse, TransportError>) -> Self {
        match result {
            Ok(PredictionResponse {
                predicted_load: Some(load),
                unit,
                ..
            }) => Self::Predicted {
                load_mw: round_half_up(load),
                unit: unit.unwrap_or_else(|| DEFAULT_LOAD_UNIT.to_string()),
            },
            Ok(PredictionResponse { error, .. }) => Self::Rejected {
                message: error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| PREDICTION_ERROR_FALLBACK.to_string()),
            },
            Err(e) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_predicted(&self) -> bool {
        matches!(self, Self::Predicted { .. })
    }

    /// What the forecast box should show for this outcome.
    pub fn display(&self) -> PredictionDisplay {
        match self {
            Self::Predicted { load_mw, unit } => PredictionDisplay {
                text: format!("{}", load_mw),
                unit: Some(unit.clone()),
                is_error: false,
            },
            Self::Rejected { message } => PredictionDisplay::error(message),
            Self::Failed { .. } => PredictionDisplay::error(SERVER_ERROR_TEXT),
        }
    }
}

/// Rounds to the nearest integer with halves going towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Content of the forecast box.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDisplay {
    pub text: String,
    pub unit: Option<String>,
    pub is_error: bool,
}

impl PredictionDisplay {
    pub fn placeholder() -> Self {
        Self::error(PREDICTION_PLACEHOLDER)
    }

    pub fn error(text: &str) -> Self {
        Self {
            text: text.to_string(),
            unit: None,
            is_error: true,
        }
    }

    pub fn has_value(&self) -> bool {
        !self.is_error
    }
}

impl Default for PredictionDisplay {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ForecastForm {
        ForecastForm {
            date: "2024-05-01".into(),
            temperature: "30".into(),
            humidity: "40".into(),
            daytype: "Weekday".into(),
            season: "SUMMER".into(),
        }
    }

    #[test]
    fn test_request_lowercases_categories() {
        let request = form().to_request();
        assert_eq!(request.date, "2024-05-01");
        assert_eq!(request.temperature, 30.0);
        assert_eq!(request.humidity, 40.0);
        assert_eq!(request.daytype, "weekday");
        assert_eq!(request.season, "summer");
    }

    #[test]
    fn test_unparseable_numbers_forwarded_as_null() {
        let mut f = form();
        f.temperature = "hot".into();
        f.humidity = "".into();
        let request = f.to_request();
        assert!(request.temperature.is_nan());
        assert!(request.humidity.is_nan());

        let body = serde_json::to_value(&request).unwrap();
        assert!(body["temperature"].is_null());
        assert!(body["humidity"].is_null());
        assert_eq!(body["season"], "summer");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(5423.7), 5424.0);
        assert_eq!(round_half_up(5423.2), 5423.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }

    #[test]
    fn test_outcome_success() {
        let response = PredictionResponse {
            predicted_load: Some(5423.7),
            unit: None,
            error: None,
        };
        let outcome = PredictionOutcome::from_response(Ok(response));
        assert_eq!(
            outcome,
            PredictionOutcome::Predicted {
                load_mw: 5424.0,
                unit: "MW".into()
            }
        );

        let display = outcome.display();
        assert_eq!(display.text, "5424");
        assert!(display.has_value());
    }

    #[test]
    fn test_outcome_domain_failure() {
        let body: PredictionResponse = serde_json::from_str(r#"{"error": "out of range"}"#).unwrap();
        let outcome = PredictionOutcome::from_response(Ok(body));
        assert_eq!(outcome.display(), PredictionDisplay::error("out of range"));

        let body: PredictionResponse = serde_json::from_str(r#"{"status": "weird"}"#).unwrap();
        let outcome = PredictionOutcome::from_response(Ok(body));
        assert_eq!(outcome.display().text, PREDICTION_ERROR_FALLBACK);
    }

    #[test]
    fn test_null_prediction_is_rejection() {
        let body: PredictionResponse =
            serde_json::from_str(r#"{"predicted_load": null}"#).unwrap();
        assert_eq!(
            PredictionOutcome::from_response(Ok(body)),
            PredictionOutcome::Rejected {
                message: PREDICTION_ERROR_FALLBACK.to_string()
            }
        );
    }

    #[test]
    fn test_outcome_transport_failure() {
        let outcome =
            PredictionOutcome::from_response(Err(TransportError::request("connection refused")));
        assert!(matches!(outcome, PredictionOutcome::Failed { ref reason } if reason.contains("connection refused")));
        assert_eq!(outcome.display(), PredictionDisplay::error(SERVER_ERROR_TEXT));
    }

    #[test]
    fn test_placeholder_is_error_styled() {
        let display = PredictionDisplay::placeholder();
        assert_eq!(display.text, "--");
        assert!(display.is_error);
    }
}
