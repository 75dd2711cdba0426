use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// No timeout unless one is configured.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder();
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}

/// Non-success answer from the OpenAI API.
pub enum ApiFailure {
    RateLimited,
    Status(String),
}

/// Passes 2xx responses through. Anything else is turned into an
/// [`ApiFailure`] carrying the status and response body.
pub async fn ensure_success(response: Response) -> Result<Response, ApiFailure> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiFailure::RateLimited);
    }
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiFailure::Status(format!("HTTP {status}: {body}")))
}
