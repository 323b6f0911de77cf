//! Error types and retry classification for portal fetches.

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching a balance slice from a portal.
///
/// Each variant is classified into a [`RetryClass`] via
/// [`retry_class`](Self::retry_class), which decides whether the fetch loop
/// sleeps and tries again or gives up on the slice immediately.
#[derive(Error, Debug)]
pub enum OpenDataError {
    /// The request timed out at connect or read time.
    /// Transient: retried with a fixed delay up to the attempt ceiling.
    #[error("Timeout fetching dataset {dataset}")]
    Timeout {
        /// Portal dataset identifier.
        dataset: String,
    },

    /// The portal answered with a non-success HTTP status.
    /// Not expected to self-heal within one request; no retry.
    #[error("Dataset {dataset} returned HTTP {status}")]
    Status {
        /// Portal dataset identifier.
        dataset: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON row array.
    /// No retry.
    #[error("Malformed response from dataset {dataset}: {message}")]
    MalformedBody {
        /// Portal dataset identifier.
        dataset: String,
        /// Decode error detail.
        message: String,
    },

    /// A non-timeout transport failure (DNS, TLS, connection reset).
    /// No retry.
    #[error("Transport error for dataset {dataset}: {message}")]
    Transport {
        /// Portal dataset identifier.
        dataset: String,
        /// Transport error detail.
        message: String,
    },
}

impl OpenDataError {
    /// Classifies a `reqwest` failure against a dataset.
    ///
    /// Connect and read timeouts become [`OpenDataError::Timeout`]; anything
    /// else is a non-retried transport error.
    pub fn from_reqwest(dataset: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::Timeout {
                dataset: dataset.to_string(),
            }
        } else {
            Self::Transport {
                dataset: dataset.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Returns the retry classification for this error.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Timeout { .. } => RetryClass::AfterDelay,
            Self::Status { .. } | Self::MalformedBody { .. } | Self::Transport { .. } => {
                RetryClass::Abort
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_retries_after_delay() {
        let error = OpenDataError::Timeout {
            dataset: "k3x9-qw2p".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::AfterDelay);
    }

    #[test]
    fn test_status_aborts() {
        let error = OpenDataError::Status {
            dataset: "k3x9-qw2p".to_string(),
            status: 503,
        };
        assert_eq!(error.retry_class(), RetryClass::Abort);
    }

    #[test]
    fn test_malformed_body_aborts() {
        let error = OpenDataError::MalformedBody {
            dataset: "k3x9-qw2p".to_string(),
            message: "expected array".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Abort);
    }

    #[test]
    fn test_transport_aborts() {
        let error = OpenDataError::Transport {
            dataset: "k3x9-qw2p".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Abort);
    }

    #[test]
    fn test_error_display() {
        let error = OpenDataError::Status {
            dataset: "k3x9-qw2p".to_string(),
            status: 404,
        };
        assert_eq!(format!("{}", error), "Dataset k3x9-qw2p returned HTTP 404");
    }
}
