use chrono::NaiveTime;
use serde::Deserialize;

/// Raw body of `GET /live-weather`.
///
/// Every field is optional: the backend answers upstream failures with an
/// `{error}` body and no readings at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveWeatherPayload {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LiveWeatherPayload {
    /// Returns a reading only when both temperature and humidity are present.
    pub fn into_reading(self) -> Option<WeatherReading> {
        let temperature = self.temperature?;
        let humidity = self.humidity?;
        let timestamp = match self.timestamp {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        };

        Some(WeatherReading {
            temperature,
            humidity,
            timestamp,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: Option<String>,
}

impl WeatherReading {
    /// Chart label for this reading: the server timestamp when it is a clock
    /// time, otherwise `now` formatted as `HH:MM:SS`.
    pub fn label(&self, now: NaiveTime) -> String {
        match &self.timestamp {
            Some(ts) if is_clock_label(ts) => ts.clone(),
            _ => clock_label(now),
        }
    }
}

/// Formats a local wall-clock time the way chart labels expect.
pub fn clock_label(now: NaiveTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Accepts `H:MM:SS` and `HH:MM:SS` (ASCII digits only, no range checks).
pub fn is_clock_label(s: &str) -> bool {
    let parts: Vec<&str> = s.split(':').collect();
    let &[hour, minute, second] = parts.as_slice() else {
        return false;
    };

    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

    (1..=2).contains(&hour.len())
        && digits(hour)
        && minute.len() == 2
        && digits(minute)
        && second.len() == 2
        && digits(second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 34, 56).unwrap()
    }

    fn reading(timestamp: Option<&str>) -> WeatherReading {
        WeatherReading {
            temperature: 31.2,
            humidity: 44.0,
            timestamp: timestamp.map(String::from),
        }
    }

    #[test]
    fn test_clock_label_patterns() {
        assert!(is_clock_label("9:05:07"));
        assert!(is_clock_label("09:05:07"));
        assert!(is_clock_label("23:59:59"));
        // Shape only, no range validation
        assert!(is_clock_label("99:99:99"));

        assert!(!is_clock_label("abc"));
        assert!(!is_clock_label("9:5:07"));
        assert!(!is_clock_label("9:05:7"));
        assert!(!is_clock_label("123:00:00"));
        assert!(!is_clock_label(":05:07"));
        assert!(!is_clock_label("09:05"));
        assert!(!is_clock_label("09:05:07:01"));
        assert!(!is_clock_label("09:05:07 "));
        assert!(!is_clock_label(""));
    }

    #[test]
    fn test_label_uses_valid_timestamp_verbatim() {
        assert_eq!(reading(Some("9:05:07")).label(noon()), "9:05:07");
    }

    #[test]
    fn test_label_falls_back_to_wall_clock() {
        assert_eq!(reading(Some("abc")).label(noon()), "12:34:56");
        assert_eq!(reading(Some("9:5:07")).label(noon()), "12:34:56");
        assert_eq!(reading(None).label(noon()), "12:34:56");
    }

    #[test]
    fn test_payload_requires_both_fields() {
        let payload: LiveWeatherPayload =
            serde_json::from_str(r#"{"temperature": 30.5, "humidity": null}"#).unwrap();
        assert!(payload.into_reading().is_none());

        let payload: LiveWeatherPayload =
            serde_json::from_str(r#"{"humidity": 40}"#).unwrap();
        assert!(payload.into_reading().is_none());

        let payload: LiveWeatherPayload =
            serde_json::from_str(r#"{"error": "Weather API request failed"}"#).unwrap();
        assert_eq!(payload.error.as_deref(), Some("Weather API request failed"));
        assert!(payload.into_reading().is_none());
    }

    #[test]
    fn test_payload_non_string_timestamp_is_ignored() {
        let payload: LiveWeatherPayload =
            serde_json::from_str(r#"{"temperature": 30, "humidity": 40, "timestamp": 1715000000}"#)
                .unwrap();
        let reading = payload.into_reading().unwrap();
        assert_eq!(reading.timestamp, None);
        assert_eq!(reading.label(noon()), "12:34:56");
    }

    #[test]
    fn test_payload_full_reading() {
        let payload: LiveWeatherPayload = serde_json::from_str(
            r#"{"temperature": 29.87, "humidity": 61.0, "timestamp": "14:02:09"}"#,
        )
        .unwrap();
        let reading = payload.into_reading().unwrap();
        assert_eq!(reading.temperature, 29.87);
        assert_eq!(reading.humidity, 61.0);
        assert_eq!(reading.label(noon()), "14:02:09");
    }
}
