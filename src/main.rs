//! og-preview - Link previews for social-media crawlers.
//!
//! Serves pre-rendered HTML with Open Graph and Twitter Card tags to bots
//! unfurling event links, and redirects everyone else to the SPA.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use tracing::error;

mod cli;
mod client;
mod config;
mod crawler;
mod description;
mod errors;
mod models;
mod render;
mod routes;
mod server;
mod urls;

use cli::{Cli, Command};
use client::{BackendClient, EnvSecrets};
use config::ServerConfig;
use server::{AppState, Preview};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Load .env before clap reads env-backed arguments
    let dotenv = load_dotenv()?;

    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    if let Some(path) = dotenv {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    match cli.command {
        Command::Serve(args) => runtime.block_on(cmd_serve(args)),
        Command::Render(args) => runtime.block_on(cmd_render(args)),
    }
}

/// Load `.env` from the working directory if one exists.
fn load_dotenv() -> Result<Option<std::path::PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("failed to load .env"),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Build application state backed by the real backend client.
fn app_state(config: ServerConfig) -> Result<AppState> {
    let events = BackendClient::new(Box::new(EnvSecrets)).context("failed to create backend client")?;
    Ok(AppState::new(config, Arc::new(events)))
}

/// Execute the `serve` command - run the preview server.
async fn cmd_serve(args: cli::ServeArgs) -> Result<()> {
    let config = ServerConfig {
        port: args.port,
        host: args.host,
        origin: args.origin,
        site: args.site.into(),
    };

    tracing::info!(
        origin = config.origin.as_deref().unwrap_or("<from Host header>"),
        site = %config.site.name,
        "starting og-preview"
    );

    server::run_server(app_state(config)?).await
}

/// Execute the `render` command - one-shot preview of a logical path.
async fn cmd_render(args: cli::RenderArgs) -> Result<()> {
    let config = ServerConfig {
        origin: Some(args.origin.clone()),
        site: args.site.into(),
        ..ServerConfig::default()
    };
    let state = app_state(config)?;

    let mut url = Url::parse(&args.origin).context("invalid origin")?;
    url.query_pairs_mut().append_pair("path", &args.path);

    let preview = server::respond(&state, &args.origin, url.as_str(), Some(&args.user_agent))
        .await
        .context("failed to render preview")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match preview {
        Preview::Redirect(location) => writeln!(handle, "302 Found\nLocation: {location}")?,
        Preview::Html(html) => write!(handle, "{html}")?,
    }

    Ok(())
}
