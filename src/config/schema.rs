// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from cmg.toml.

use serde::{Deserialize, Serialize};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default OpenAI endpoint.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Default Ollama model.
pub const DEFAULT_MODEL: &str = "codellama";

/// Default OpenAI chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default provider request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The main configuration structure for cmg.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CmgConfig {
    /// Model provider configuration.
    pub provider: ProviderConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl CmgConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Write this configuration to a specific path.
    pub fn save_to(&self, path: &std::path::Path) -> crate::error::Result<()> {
        super::loader::save_config_to(path, self)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::{CmgError, ConfigError};

        if self.provider.timeout_secs == 0 {
            return Err(CmgError::Config(ConfigError::InvalidValue {
                key: "provider.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            }));
        }

        for (key, url) in [
            ("provider.ollama_url", &self.provider.ollama_url),
            ("provider.openai_url", &self.provider.openai_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CmgError::Config(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("'{}' is not an http(s) URL", url),
                }));
            }
        }

        Ok(())
    }
}

/// Model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ProviderKind>,

    /// Ollama model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// OpenAI API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// OpenAI chat model.
    pub openai_model: String,

    /// Base URL of the Ollama server.
    pub ollama_url: String,

    /// Base URL of the OpenAI-compatible API.
    pub openai_url: String,

    /// Request timeout for either provider.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: None,
            model: None,
            api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            openai_url: DEFAULT_OPENAI_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// The configured Ollama model, or the built-in default.
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to show a spinner while generating.
    pub spinner: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            spinner: true,
        }
    }
}

/// Strategy used to produce a commit message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Rule-based analysis of the diff, no network.
    #[serde(alias = "heuristic")]
    #[value(alias = "heuristic")]
    Simple,
    /// Local Ollama server.
    #[serde(alias = "local")]
    #[value(alias = "local")]
    Ollama,
    /// OpenAI chat completions.
    #[serde(rename = "openai", alias = "remote")]
    #[value(name = "openai", alias = "remote")]
    OpenAi,
}

impl ProviderKind {
    /// Get the string representation of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Simple => "simple",
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// All selectable providers, in menu order.
    pub fn all() -> &'static [ProviderKind] {
        &[ProviderKind::Simple, ProviderKind::Ollama, ProviderKind::OpenAi]
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" | "heuristic" => Ok(ProviderKind::Simple),
            "ollama" | "local" => Ok(ProviderKind::Ollama),
            "openai" | "remote" => Ok(ProviderKind::OpenAi),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conventional commit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl CommitType {
    /// Get the string representation of the commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
        }
    }

    /// Get all commit types, in the order they are offered to models.
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Docs,
            CommitType::Style,
            CommitType::Refactor,
            CommitType::Perf,
            CommitType::Test,
            CommitType::Build,
            CommitType::Ci,
            CommitType::Chore,
        ]
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" | "feature" => Ok(CommitType::Feat),
            "fix" | "bugfix" => Ok(CommitType::Fix),
            "docs" | "doc" => Ok(CommitType::Docs),
            "style" => Ok(CommitType::Style),
            "refactor" => Ok(CommitType::Refactor),
            "perf" | "performance" => Ok(CommitType::Perf),
            "test" | "tests" => Ok(CommitType::Test),
            "build" => Ok(CommitType::Build),
            "ci" => Ok(CommitType::Ci),
            "chore" => Ok(CommitType::Chore),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
