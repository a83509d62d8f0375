// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message generation.
//!
//! The [`Generator`] selects the heuristic or a model provider and falls
//! back to the heuristic whenever a provider fails.

mod generator;
mod ollama;
mod openai;
mod prompt;
mod provider;

pub use generator::{GeneratedMessage, GenerationRequest, Generator};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use provider::{normalize_response, MessageProvider};
