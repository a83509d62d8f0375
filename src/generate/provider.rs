// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The provider seam and shared HTTP handling.

use crate::error::ProviderError;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

lazy_static! {
    /// A response wrapped in a Markdown code fence.
    static ref FENCE_REGEX: Regex = Regex::new(r"^```[A-Za-z0-9_-]*\s*\n?(?s)(?P<body>.*?)\n?```$")
        .unwrap();
}

/// Something that turns a prompt into a completion.
pub trait MessageProvider {
    /// Provider name for logs and errors.
    fn name(&self) -> &str;

    /// Send the prompt and return the raw completion text.
    fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Build a blocking HTTP client with the request timeout applied.
pub(crate) fn http_client(
    provider: &str,
    timeout: Duration,
) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Unavailable {
            provider: provider.to_string(),
            message: e.to_string(),
        })
}

/// Map a transport error to a provider error.
pub(crate) fn request_error(provider: &str, timeout: Duration, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            seconds: timeout.as_secs(),
        }
    } else if err.is_decode() {
        ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: err.to_string(),
        }
    } else {
        ProviderError::Unavailable {
            provider: provider.to_string(),
            message: err.to_string(),
        }
    }
}

/// Turn a non-success response into an error, passing successes through.
pub(crate) fn check_status(
    provider: &str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: String = response.text().unwrap_or_default().chars().take(200).collect();
    Err(ProviderError::HttpStatus {
        provider: provider.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Strip code fences and wrapping quotes from a completion.
///
/// An empty result is a malformed response.
pub fn normalize_response(provider: &str, raw: &str) -> Result<String, ProviderError> {
    let mut text = raw.trim();

    if let Some(captures) = FENCE_REGEX.captures(text) {
        text = captures.name("body").map(|m| m.as_str().trim()).unwrap_or("");
    }

    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].trim();
        }
    }

    if text.is_empty() {
        return Err(ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: "empty completion".to_string(),
        });
    }

    Ok(text.to_string())
}
