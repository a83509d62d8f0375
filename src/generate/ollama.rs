// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Local model provider backed by an Ollama server.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::provider::{check_status, http_client, request_error, MessageProvider};

const PROVIDER: &str = "ollama";

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    response: String,
}

/// Client for `POST /api/generate`.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaProvider {
    /// Create a client for the given server and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout,
        }
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

impl MessageProvider for OllamaProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = http_client(PROVIDER, self.timeout)?;
        let url = self.endpoint();
        info!(url = %url, model = %self.model, "Sending request to Ollama");

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| request_error(PROVIDER, self.timeout, e))?;

        let body: GenerateResponse = check_status(PROVIDER, response)?
            .json()
            .map_err(|e| ProviderError::MalformedResponse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        debug!(response_len = body.response.len(), "Received Ollama completion");
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_slash() {
        let provider = OllamaProvider::new("http://localhost:11434/", "codellama", Duration::from_secs(1));
        assert_eq!(provider.endpoint(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            model: "codellama",
            prompt: "hi",
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "codellama", "prompt": "hi", "stream": false})
        );
    }

    #[test]
    fn test_unreachable_server_is_an_error() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let provider = OllamaProvider::new("http://127.0.0.1:9", "codellama", Duration::from_secs(2));
        let err = provider.complete("prompt").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Unavailable { .. } | ProviderError::Timeout { .. }
        ));
    }
}
