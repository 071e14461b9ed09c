//! auto-commit-msg - CLI entry point.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use auto_commit_msg::{
    ChatClient, CommitMessageWorkflow, Config, Destination, GitCli, HookContext, Outcome,
};

/// Generate a commit message for the staged changes.
///
/// Install as a `prepare-commit-msg` hook, or run it directly to print a
/// message to stdout.
#[derive(Parser, Debug)]
#[command(name = "auto-commit-msg")]
#[command(about = "Generate a conventional commit message from the staged diff")]
#[command(version)]
struct Cli {
    /// File to write the message to (git passes COMMIT_EDITMSG); prints to stdout if omitted
    commit_msg_file: Option<PathBuf>,

    /// Commit source passed by git to prepare-commit-msg; generation is skipped when set
    commit_source: Option<String>,

    /// Commit SHA passed by git for amends; accepted so git's three arguments parse
    #[arg(hide = true, value_name = "SHA")]
    _sha: Option<String>,

    /// Path to the config file (defaults to ./.auto-commit-msg.toml, then ~/.auto-commit-msg.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log model selection and request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Leave git's message alone before touching config, so a broken
    // config never aborts `git commit -m`
    let hook = HookContext::from_env().with_cli_source(cli.commit_source);
    if hook.should_skip() {
        let source = hook.commit_source.as_deref().unwrap_or_default();
        info!("Skipped: git already has a message ({source})");
        return Ok(());
    }

    // Step 2: Build the configuration snapshot
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Step 3: Wire collaborators
    let git = GitCli::new();
    let chat = ChatClient::new(
        config.provider.base_url.clone(),
        config.provider.secret.expose(),
    )
    .context("Failed to create HTTP client")?;
    let destination = Destination::from_arg(cli.commit_msg_file);

    // Step 4: Generate and write
    let outcome = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(&hook, &destination)
        .await
        .map_err(|e| {
            let kind = e.kind();
            anyhow::Error::new(e).context(format!("Failed to generate commit message ({kind})"))
        })?;

    match outcome {
        Outcome::Skipped { commit_source } => {
            info!("Skipped: git already has a message ({commit_source})");
        }
        Outcome::Written { model, stats, .. } => {
            if let Destination::File(path) = &destination {
                info!(
                    "Wrote commit message from {} ({} changed lines) to {}",
                    model,
                    stats.total_changes(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries the commit message.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
