// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::commit::{confirm_message, Confirmation};
use crate::config::{save_config_to, user_config_path, CmgConfig, ProviderKind};
use crate::error::{CmgError, Result};
use crate::generate::{GenerationRequest, Generator};
use crate::git::{create_commit_in_repo, stage_files_in_repo, staged_diff_text, Repository};

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::args::{Cli, Commands, CommitArgs, GenerationArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Version => run_version(),
        Commands::Config => run_config(&cli),
        Commands::Commit(args) => {
            let config = load(&cli)?;
            run_commit(&config, args)
        }
        Commands::Message(args) => {
            let config = load(&cli)?;
            run_message(&config, args)
        }
    }
}

fn load(cli: &Cli) -> Result<CmgConfig> {
    let config = match &cli.config {
        Some(path) => CmgConfig::load_from(path)?,
        None => CmgConfig::load()?,
    };
    console::set_colors_enabled(config.ui.color);
    console::set_colors_enabled_stderr(config.ui.color);
    Ok(config)
}

fn request_for(diff: String, args: &GenerationArgs) -> GenerationRequest {
    GenerationRequest::new(diff)
        .with_provider(args.provider)
        .with_model(args.model.clone())
        .with_api_key(args.api_key.clone())
}

/// Generate a message, showing a spinner while a model is consulted.
fn generate(config: &CmgConfig, request: &GenerationRequest) -> String {
    let generator = Generator::new(config);
    let provider = generator.select(request);

    if !config.ui.spinner || provider == ProviderKind::Simple {
        return generator.generate(request);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating commit message with {}...", provider));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let generated = generator.generate_detailed(request);
    spinner.finish_and_clear();

    if let Some(reason) = &generated.fallback_reason {
        tracing::debug!("Used simple mode after {} failed: {}", provider, reason);
    }
    generated.message
}

/// Run the commit command.
fn run_commit(config: &CmgConfig, args: &CommitArgs) -> Result<()> {
    tracing::debug!("Running commit command with args: {:?}", args);

    let repo = Repository::open_current()?;

    if !args.files.is_empty() {
        let paths: Vec<&Path> = args.files.iter().map(PathBuf::as_path).collect();
        stage_files_in_repo(&repo, &paths)?;
    }

    let diff = staged_diff_text(&repo)?;

    let message = match &args.message {
        Some(message) => message.clone(),
        None => generate(config, &request_for(diff, &args.generation)),
    };

    let message = if args.interactive {
        match confirm_message(&message)? {
            Confirmation::Aborted => {
                println!("{}", style("Commit aborted").yellow());
                return Ok(());
            }
            confirmed => confirmed.message().unwrap_or(&message).to_string(),
        }
    } else {
        message
    };

    if args.dry_run {
        println!(
            "{} Would commit with message:",
            style("[dry-run]").yellow()
        );
        println!("{}", message);
        return Ok(());
    }

    let sha = create_commit_in_repo(&repo, &message)?;
    let short_sha = &sha[..7.min(sha.len())];
    let header = message.lines().next().unwrap_or_default();

    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style(format!("[{}]", short_sha)).cyan(),
        header
    );

    Ok(())
}

/// Run the message command.
fn run_message(config: &CmgConfig, args: &GenerationArgs) -> Result<()> {
    tracing::debug!("Running message command with args: {:?}", args);

    let repo = Repository::open_current()?;
    let diff = staged_diff_text(&repo)?;

    println!("{}", generate(config, &request_for(diff, args)));
    Ok(())
}

/// Run the interactive configuration command.
fn run_config(cli: &Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => user_config_path().ok_or_else(|| CmgError::WithContext {
            context: "config".to_string(),
            message: "Could not determine the user configuration directory".to_string(),
        })?,
    };

    let mut config = if path.is_file() {
        CmgConfig::load_from(&path)?
    } else {
        CmgConfig::default()
    };

    let theme = ColorfulTheme::default();

    let labels: Vec<String> = ProviderKind::all()
        .iter()
        .map(|kind| format!("{:<8} {}", kind.as_str(), provider_summary(*kind)))
        .collect();
    let current = config.provider.default.unwrap_or(ProviderKind::Simple);
    let selected = Select::with_theme(&theme)
        .with_prompt("Default provider")
        .items(&labels)
        .default(
            ProviderKind::all()
                .iter()
                .position(|kind| *kind == current)
                .unwrap_or(0),
        )
        .interact()?;
    let provider = ProviderKind::all()[selected];
    config.provider.default = Some(provider);

    match provider {
        ProviderKind::OpenAi => {
            let keep_existing = config.provider.api_key.is_some();
            let prompt = if keep_existing {
                "OpenAI API key (leave empty to keep the current one)"
            } else {
                "OpenAI API key"
            };
            let key = Password::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty_password(keep_existing)
                .interact()?;
            if !key.trim().is_empty() {
                config.provider.api_key = Some(key.trim().to_string());
            }
        }
        ProviderKind::Ollama => {
            let model: String = Input::with_theme(&theme)
                .with_prompt("Ollama model")
                .default(config.provider.model_or_default().to_string())
                .interact_text()?;
            config.provider.model = Some(model);
        }
        ProviderKind::Simple => {}
    }

    config.validate()?;
    save_config_to(&path, &config)?;

    println!(
        "{} Saved configuration to {}",
        style("✓").green().bold(),
        path.display()
    );

    Ok(())
}

fn provider_summary(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Simple => "Rule-based analysis, works offline",
        ProviderKind::Ollama => "Local model served by Ollama",
        ProviderKind::OpenAi => "OpenAI chat completions (requires an API key)",
    }
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmg {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
