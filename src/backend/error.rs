//! Registration backend error types.

/// Errors that can occur while talking to the registration endpoint.
/// All of them lack a structured per-field verdict, so the caller reports
/// them as generic transport failures.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Failed to deserialize a response body
    #[error("Failed to deserialize response body: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The backend rejected the request but its body carried no readable
    /// per-field error object
    #[error("Rejection response (status {status}) had no readable error body")]
    MalformedErrorBody { status: u16 },
}
