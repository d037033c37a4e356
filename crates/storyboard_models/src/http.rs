//! Shared HTTP plumbing for provider drivers.

use reqwest::{Client, Response};
use std::time::Duration;
use storyboard_error::{ModelsError, ModelsErrorKind, ModelsResult};
use tracing::error;

/// Build a client whose every request is bounded by `timeout_secs`.
pub(crate) fn client(provider: &'static str, timeout_secs: u64) -> ModelsResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            ModelsError::new(ModelsErrorKind::InvalidConfiguration(format!(
                "{}: failed to build HTTP client: {}",
                provider, e
            )))
        })
}

/// Map a failed send into a transport error.
pub(crate) fn send_error(
    provider: &'static str,
    timeout_secs: u64,
    e: reqwest::Error,
) -> ModelsError {
    error!(provider, error = ?e, "HTTP request failed");
    if e.is_timeout() {
        ModelsError::new(ModelsErrorKind::Timeout {
            provider,
            seconds: timeout_secs,
        })
    } else {
        ModelsError::new(ModelsErrorKind::Http {
            provider,
            message: e.to_string(),
        })
    }
}

/// Pass successful responses through; classify the rest by status.
pub(crate) async fn check_status(
    provider: &'static str,
    response: Response,
) -> ModelsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    error!(provider, status = %status, error = %error_text, "API error");

    Err(ModelsError::new(ModelsErrorKind::from_status(
        provider,
        status.as_u16(),
        error_text,
    )))
}

/// Read the body as text.
pub(crate) async fn body_text(provider: &'static str, response: Response) -> ModelsResult<String> {
    response.text().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to read response");
        ModelsError::new(ModelsErrorKind::ResponseConversion(format!(
            "{}: failed to read response: {}",
            provider, e
        )))
    })
}
