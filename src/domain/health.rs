use serde::Deserialize;
use std::fmt;

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl BackendHealth {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online(BackendHealth),
    Offline(String),
}

impl BackendStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online(_))
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Checking backend..."),
            Self::Online(health) => match &health.model {
                Some(model) => write!(f, "Online ({})", model),
                None => write!(f, "Online"),
            },
            Self::Offline(reason) => write!(f, "Offline: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_body() {
        let health: BackendHealth = serde_json::from_str(
            r#"{"status": "OK", "backend": "Flask", "model": "ANN (MATLAB)", "time": "2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert!(health.is_ok());
        assert_eq!(
            BackendStatus::Online(health).to_string(),
            "Online (ANN (MATLAB))"
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(BackendStatus::default().to_string(), "Checking backend...");
        let offline = BackendStatus::Offline("Request failed: timeout".into());
        assert!(!offline.is_online());
        assert!(offline.to_string().contains("timeout"));
    }
}
