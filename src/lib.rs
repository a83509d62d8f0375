// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmg - Conventional commit message generator
//!
//! Turns a unified diff into a `type(scope): description` commit message.
//!
//! # Features
//!
//! - **Heuristic classifier**: ordered rule tables over the parsed diff, no network
//! - **Model providers**: Ollama and OpenAI, with fallback to the heuristic on any failure
//! - **Git integration**: stage files, read the staged diff and commit
//!
//! # Example
//!
//! ```
//! use cmg::analysis::heuristic_message;
//!
//! let diff = "diff --git a/docs/intro.md b/docs/intro.md\n+# Intro\n";
//! assert_eq!(heuristic_message(diff), "docs(docs): add intro documentation");
//! ```

pub mod analysis;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod generate;
pub mod git;

pub use config::CmgConfig;
pub use error::{CmgError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmg.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => format!("{} ({})", VERSION, &sha[..7.min(sha.len())]),
            _ => VERSION.to_string(),
        }
    }
}
