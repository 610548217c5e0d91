//! The scaffolding command: load config, resolve, fetch, and report

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use create_cp_core::{
    CancellationToken, ConfigLoader, Error, InitialFlags, Outcome, Resolution, RuntimeConfig,
    Scaffolder,
};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cli::Cli;
use crate::output::{self, SpinnerProgress};
use crate::prompts::TerminalPrompter;

/// Run a scaffolding session and report its outcome
pub async fn run(cli: Cli) -> Result<Outcome> {
    let config = load_config(&cli)?;
    let cwd = current_dir()?;
    debug!("Working directory: {}", cwd);

    output::banner();

    let scaffolder = Scaffolder::new(config, cwd);
    let flags = InitialFlags::new(cli.target_dir.as_deref(), cli.template);
    let user_agent = scaffolder.user_agent();

    let session = match scaffolder.resolve(flags, &mut TerminalPrompter)? {
        Resolution::Resolved(session) => session,
        Resolution::Cancelled(reason) => {
            output::cancelled(&reason.to_string());
            return Ok(Outcome::Cancelled(reason));
        }
    };

    // SIGINT keeps its default behaviour until the clone starts.
    let token = CancellationToken::new();
    let listener = spawn_interrupt_listener(token.clone());

    let progress = SpinnerProgress::new();
    let outcome = scaffolder
        .create(session, &progress, &token, user_agent.as_deref())
        .await;
    listener.abort();
    let outcome = outcome?;

    match &outcome {
        Outcome::Created { next_steps, .. } => output::next_steps(next_steps),
        Outcome::Cancelled(reason) => output::cancelled(&reason.to_string()),
        Outcome::FetchFailed { reason } => debug!("Clone failed: {}", reason),
        Outcome::Aborted => debug!("Clone interrupted"),
    }

    Ok(outcome)
}

fn spawn_interrupt_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

fn load_config(cli: &Cli) -> Result<RuntimeConfig> {
    let loader = ConfigLoader::new();
    let mut config = match &cli.config {
        Some(path) => loader.load_file(path)?,
        None => loader.load()?,
    };
    if cli.depth.is_some() {
        config.clone_depth = cli.depth;
    }
    Ok(config)
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| Error::invalid_path(path.display().to_string()).into())
}
