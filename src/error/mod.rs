// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for cmg.
//!
//! The heuristic classifier never fails, so nothing here is produced by the
//! `analysis` module. Provider errors are recovered by the generator and
//! only surface in logs; git and config errors reach the user.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cmg operations.
#[derive(Error, Debug)]
pub enum CmgError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Model provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for CmgError {
    fn from(err: dialoguer::Error) -> Self {
        CmgError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to write configuration to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("No staged changes found")]
    NoStagedChanges,

    #[error("Failed to get diff: {message}")]
    DiffFailed { message: String },

    #[error("Failed to create commit: {message}")]
    CommitFailed { message: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Failures raised while asking a model provider for a message.
///
/// All of these are recovered by falling back to the heuristic generator.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} requires an API key but none is configured")]
    MissingCredential { provider: String },

    #[error("{provider} is unavailable: {message}")]
    Unavailable { provider: String, message: String },

    #[error("{provider} timed out after {seconds}s")]
    Timeout { provider: String, seconds: u64 },

    #[error("{provider} returned HTTP {status}: {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse { provider: String, message: String },
}

impl ProviderError {
    /// Whether a retry could plausibly succeed.
    ///
    /// No retry is performed; this only feeds the fallback warning.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Timeout { .. } | ProviderError::Unavailable { .. } => true,
            ProviderError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            ProviderError::MissingCredential { .. } | ProviderError::MalformedResponse { .. } => {
                false
            }
        }
    }
}

/// Result type alias for cmg operations.
pub type Result<T> = std::result::Result<T, CmgError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CmgError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
