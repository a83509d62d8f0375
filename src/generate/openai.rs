// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Remote model provider backed by the OpenAI chat completions API.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::prompt::SYSTEM_PROMPT;
use super::provider::{check_status, http_client, request_error, MessageProvider};

const PROVIDER: &str = "openai";

/// OpenAI API request message
#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI API request body
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Client for `POST /v1/chat/completions`.
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a client. The key must already be known to be present.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout,
        }
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl MessageProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = http_client(PROVIDER, self.timeout)?;
        let url = self.endpoint();
        info!(url = %url, model = %self.model, "Sending request to OpenAI");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| request_error(PROVIDER, self.timeout, e))?;

        let body: ChatResponse = check_status(PROVIDER, response)?
            .json()
            .map_err(|e| ProviderError::MalformedResponse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        first_content(body)
    }
}

fn first_content(body: ChatResponse) -> Result<String, ProviderError> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: PROVIDER.to_string(),
            message: "response has no message content".to_string(),
        })?;

    debug!(response_len = content.len(), "Received OpenAI completion");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let provider = OpenAiProvider::new(
            "https://api.openai.com",
            "sk-test",
            "gpt-3.5-turbo",
            Duration::from_secs(1),
        );
        assert_eq!(
            provider.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_first_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"feat: add login"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(body).unwrap(), "feat: add login");
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_content(body),
            Err(ProviderError::MalformedResponse { .. })
        ));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(first_content(body).is_err());
    }
}
