use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    Timeout,
    ApiError,
    NetworkError,
    MalformedResponse,
}

/// Failure body the analysis endpoint may attach to a non-2xx response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const GENERIC_API_FAILURE: &str = "Analysis failed";

/// Terminal failure of one submission. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("request timed out after {}", human_duration(*after))]
    Timeout { after: Duration },
    #[error("{0}")]
    ApiError(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClassifiedError {
    pub fn api(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_API_FAILURE.to_string());
        Self::ApiError(message)
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Timeout { .. } => ErrorClass::Timeout,
            Self::ApiError(_) => ErrorClass::ApiError,
            Self::NetworkError(_) => ErrorClass::NetworkError,
            Self::MalformedResponse(_) => ErrorClass::MalformedResponse,
        }
    }

    /// Single human-readable line shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout { after } => format!(
                "Request timed out after {}. The event may be too large or the servers may be busy. Please try again.",
                human_duration(*after)
            ),
            Self::ApiError(message) => message.clone(),
            Self::NetworkError(_) => {
                "Could not reach the analysis service. Check your connection and try again."
                    .to_string()
            }
            Self::MalformedResponse(_) => {
                "The analysis service returned an unreadable report. Please try again.".to_string()
            }
        }
    }
}

/// Configured deadline as the user wrote it; sub-second and fractional
/// values stay in milliseconds so the message never misstates it.
fn human_duration(after: Duration) -> String {
    if after.subsec_nanos() % 1_000_000 != 0 {
        return format!("{after:?}");
    }
    if after.subsec_millis() != 0 {
        let millis = after.as_millis();
        return if millis == 1 {
            "1 millisecond".to_string()
        } else {
            format!("{millis} milliseconds")
        };
    }
    let seconds = after.as_secs();
    if seconds >= 60 && seconds % 60 == 0 {
        let minutes = seconds / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else if seconds == 1 {
        "1 second".to_string()
    } else {
        format!("{seconds} seconds")
    }
}
