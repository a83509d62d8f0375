// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use crate::config::ProviderKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cmg - Conventional commit message generator
///
/// Reads the staged diff and writes a conventional commit message for it,
/// using local heuristics or a language model.
#[derive(Parser, Debug)]
#[command(name = "cmg")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message generator", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a message for the staged changes and commit them
    Commit(CommitArgs),

    /// Print the generated message without committing
    Message(GenerationArgs),

    /// Configure the default provider interactively
    Config,

    /// Print version information
    Version,
}

/// Provider selection shared by commands that generate messages.
#[derive(Args, Debug, Default, Clone)]
pub struct GenerationArgs {
    /// Provider used to generate the message
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Model name for the Ollama provider
    #[arg(long)]
    pub model: Option<String>,

    /// API key for the OpenAI provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the commit command.
#[derive(Args, Debug, Default, Clone)]
pub struct CommitArgs {
    /// Files to stage before reading the diff
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Use this message instead of generating one
    #[arg(short, long)]
    pub message: Option<String>,

    /// Confirm the message before committing
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the message without committing
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub generation: GenerationArgs,
}
