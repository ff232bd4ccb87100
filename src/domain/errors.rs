use thiserror::Error;

/// Errors raised while talking to the forecasting backend.
///
/// These never reach the user as-is: the weather poller swallows them and the
/// prediction controller turns them into a generic "Server error" display.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    #[error("Request failed: {reason}")]
    Request { reason: String },

    #[error("Endpoint returned status {status}")]
    Status { status: u16 },

    #[error("Malformed response body: {reason}")]
    MalformedBody { reason: String },
}

impl TransportError {
    pub fn request(reason: impl Into<String>) -> Self {
        Self::Request {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBody {
            reason: reason.into(),
        }
    }
}
