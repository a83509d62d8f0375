// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Message generation with provider fallback.

use crate::analysis::heuristic_message;
use crate::config::{CmgConfig, ProviderConfig, ProviderKind};
use crate::error::ProviderError;
use std::time::Duration;

use super::ollama::OllamaProvider;
use super::openai::OpenAiProvider;
use super::prompt::build_prompt;
use super::provider::{normalize_response, MessageProvider};

/// Input to a single generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Staged diff text.
    pub diff: String,
    /// Explicit provider; falls back to the configured default.
    pub provider: Option<ProviderKind>,
    /// Ollama model override.
    pub model: Option<String>,
    /// OpenAI key override.
    pub api_key: Option<String>,
}

impl GenerationRequest {
    /// Create a request for a diff with no overrides.
    pub fn new(diff: impl Into<String>) -> Self {
        Self {
            diff: diff.into(),
            ..Self::default()
        }
    }

    /// Set the provider.
    pub fn with_provider(mut self, provider: Option<ProviderKind>) -> Self {
        self.provider = provider;
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// A generated message and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    /// The commit message.
    pub message: String,
    /// Strategy that was selected.
    pub requested: ProviderKind,
    /// Why the heuristic was used instead, if it was a fallback.
    pub fallback_reason: Option<String>,
}

impl GeneratedMessage {
    /// Whether the selected provider failed.
    pub fn fell_back(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Picks a strategy and always returns a message.
#[derive(Debug, Clone)]
pub struct Generator {
    config: ProviderConfig,
}

impl Generator {
    /// Create a generator from the full configuration.
    pub fn new(config: &CmgConfig) -> Self {
        Self {
            config: config.provider.clone(),
        }
    }

    /// Create a generator from provider settings only.
    pub fn with_provider_config(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Explicit request option, else configured default, else heuristic.
    pub fn select(&self, request: &GenerationRequest) -> ProviderKind {
        request
            .provider
            .or(self.config.default)
            .unwrap_or(ProviderKind::Simple)
    }

    /// Generate a commit message. Never fails.
    pub fn generate(&self, request: &GenerationRequest) -> String {
        self.generate_detailed(request).message
    }

    /// Generate a commit message, reporting which path produced it.
    pub fn generate_detailed(&self, request: &GenerationRequest) -> GeneratedMessage {
        let requested = self.select(request);
        tracing::debug!("Selected provider: {}", requested);

        if requested == ProviderKind::Simple {
            return GeneratedMessage {
                message: heuristic_message(&request.diff),
                requested,
                fallback_reason: None,
            };
        }

        let result = self
            .provider_for(requested, request)
            .and_then(|provider| invoke(provider.as_ref(), &request.diff));

        finish(requested, &request.diff, result)
    }

    /// Generate with a specific provider, falling back on failure.
    pub fn generate_with(&self, provider: &dyn MessageProvider, diff: &str) -> GeneratedMessage {
        let requested = provider.name().parse().unwrap_or(ProviderKind::Simple);
        finish(requested, diff, invoke(provider, diff))
    }

    fn provider_for(
        &self,
        kind: ProviderKind,
        request: &GenerationRequest,
    ) -> Result<Box<dyn MessageProvider>, ProviderError> {
        let timeout = Duration::from_secs(self.config.timeout_secs);

        match kind {
            ProviderKind::Ollama => {
                let model = request
                    .model
                    .clone()
                    .unwrap_or_else(|| self.config.model_or_default().to_string());
                Ok(Box::new(OllamaProvider::new(
                    self.config.ollama_url.clone(),
                    model,
                    timeout,
                )))
            }
            ProviderKind::OpenAi => {
                let api_key = request
                    .api_key
                    .clone()
                    .or_else(|| self.config.api_key.clone())
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| ProviderError::MissingCredential {
                        provider: kind.to_string(),
                    })?;
                Ok(Box::new(OpenAiProvider::new(
                    self.config.openai_url.clone(),
                    api_key,
                    self.config.openai_model.clone(),
                    timeout,
                )))
            }
            ProviderKind::Simple => Err(ProviderError::Unavailable {
                provider: kind.to_string(),
                message: "the heuristic generator is not a remote provider".to_string(),
            }),
        }
    }
}

fn invoke(provider: &dyn MessageProvider, diff: &str) -> Result<String, ProviderError> {
    let raw = provider.complete(&build_prompt(diff))?;
    normalize_response(provider.name(), &raw)
}

fn finish(
    requested: ProviderKind,
    diff: &str,
    result: Result<String, ProviderError>,
) -> GeneratedMessage {
    match result {
        Ok(message) => GeneratedMessage {
            message,
            requested,
            fallback_reason: None,
        },
        Err(err) => {
            tracing::warn!(
                transient = err.is_transient(),
                "{}, falling back to simple mode",
                err
            );
            GeneratedMessage {
                message: heuristic_message(diff),
                requested,
                fallback_reason: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "diff --git a/src/api/users.ts b/src/api/users.ts\n\
                        +export const users = [];\n\
                        +export const count = 0;\n\
                        +export default users;\n";

    struct FixedProvider(&'static str);

    impl MessageProvider for FixedProvider {
        fn name(&self) -> &str {
            "ollama"
        }

        fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProvider;

    impl MessageProvider for FailingProvider {
        fn name(&self) -> &str {
            "openai"
        }

        fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Timeout {
                provider: "openai".to_string(),
                seconds: 30,
            })
        }
    }

    fn generator() -> Generator {
        Generator::new(&CmgConfig::default())
    }

    #[test]
    fn test_select_precedence() {
        let mut config = ProviderConfig::default();
        assert_eq!(
            Generator::with_provider_config(config.clone()).select(&GenerationRequest::new("")),
            ProviderKind::Simple
        );

        config.default = Some(ProviderKind::Ollama);
        let generator = Generator::with_provider_config(config);
        assert_eq!(generator.select(&GenerationRequest::new("")), ProviderKind::Ollama);
        assert_eq!(
            generator.select(&GenerationRequest::new("").with_provider(Some(ProviderKind::OpenAi))),
            ProviderKind::OpenAi
        );
    }

    #[test]
    fn test_simple_uses_heuristic() {
        let result = generator().generate_detailed(&GenerationRequest::new(DIFF));
        assert_eq!(result.message, "feat(api): update code");
        assert!(!result.fell_back());
    }

    #[test]
    fn test_provider_success() {
        let result = generator().generate_with(&FixedProvider("```\nfeat: add users\n```"), DIFF);
        assert_eq!(result.message, "feat: add users");
        assert_eq!(result.requested, ProviderKind::Ollama);
        assert!(!result.fell_back());
    }

    #[test]
    fn test_provider_failure_matches_heuristic() {
        let result = generator().generate_with(&FailingProvider, DIFF);
        assert_eq!(result.message, heuristic_message(DIFF));
        assert!(result.fell_back());
        assert_eq!(result.requested, ProviderKind::OpenAi);
    }

    #[test]
    fn test_empty_completion_falls_back() {
        let result = generator().generate_with(&FixedProvider("   "), DIFF);
        assert_eq!(result.message, heuristic_message(DIFF));
        assert!(result.fell_back());
    }

    #[test]
    fn test_missing_credential_falls_back() {
        let request = GenerationRequest::new(DIFF).with_provider(Some(ProviderKind::OpenAi));
        let result = generator().generate_detailed(&request);
        assert_eq!(result.message, heuristic_message(DIFF));
        assert!(result.fallback_reason.unwrap().contains("API key"));
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let request = GenerationRequest::new(DIFF)
            .with_provider(Some(ProviderKind::OpenAi))
            .with_api_key(Some("  ".to_string()));
        assert!(generator().generate_detailed(&request).fell_back());
    }

    #[test]
    fn test_unreachable_ollama_falls_back() {
        let mut config = ProviderConfig::default();
        config.ollama_url = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 2;
        let request = GenerationRequest::new(DIFF).with_provider(Some(ProviderKind::Ollama));

        let message = Generator::with_provider_config(config).generate(&request);
        assert_eq!(message, heuristic_message(DIFF));
    }
}
