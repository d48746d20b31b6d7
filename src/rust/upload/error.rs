use std::io;

/// Message shown when a submission is attempted with no file selected.
pub const NO_FILE_MESSAGE: &str = "Please choose a PDF first.";

/// Message shown for a failed response that carries no `error` text.
pub const FALLBACK_MESSAGE: &str = "Prediction failed";

/// Everything that can go wrong between pressing submit and showing a result.
///
/// The `Display` text of each variant is exactly what the error panel shows.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// Submit pressed with no file selected; no request was made
    #[error("{}", NO_FILE_MESSAGE)]
    NoFileSelected,
    /// The request never produced a response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected
    #[error("{0}")]
    MalformedResponse(#[from] serde_json::Error),
    /// The chosen file could not be read
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl PredictError {
    /// Builds an `Api` error from a failed response body, falling back to
    /// the fixed message when the body has no usable `error` string.
    pub fn from_failure_body(status: u16, body: &serde_json::Value) -> Self {
        Self::from_failure_body_or(status, body, FALLBACK_MESSAGE)
    }

    /// Same as [`from_failure_body`](Self::from_failure_body) with a caller
    /// chosen fallback, for endpoints other than `/api/predict`.
    pub fn from_failure_body_or(status: u16, body: &serde_json::Value, fallback: &str) -> Self {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(fallback)
            .to_string();
        Self::Api { status, message }
    }
}
