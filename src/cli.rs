//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing. Every option can also be set
//! through the environment.

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_LOCALE, DEFAULT_SITE_DESCRIPTION, DEFAULT_SITE_NAME, DEFAULT_THEME_COLOR, SiteConfig,
};
use crate::urls::parse_origin;

/// Link preview responder for social-media crawlers.
#[derive(Parser, Debug)]
#[command(name = "og-preview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the preview HTTP server
    Serve(ServeArgs),

    /// Print what a client would receive for a logical path and exit
    Render(RenderArgs),
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PREVIEW_PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "PREVIEW_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Public origin of the SPA; derived from the Host header when unset
    #[arg(long, env = "PREVIEW_ORIGIN", value_parser = parse_origin_arg)]
    pub origin: Option<String>,

    #[command(flatten)]
    pub site: SiteArgs,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Logical path to render (e.g. /eventos/42)
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Public origin of the SPA
    #[arg(long, env = "PREVIEW_ORIGIN", value_parser = parse_origin_arg)]
    pub origin: String,

    /// User agent to impersonate
    #[arg(long, default_value = "facebookexternalhit/1.1")]
    pub user_agent: String,

    #[command(flatten)]
    pub site: SiteArgs,
}

/// Site branding shared by all commands.
#[derive(Args, Debug)]
pub struct SiteArgs {
    /// Site name used in titles and og:site_name
    #[arg(long, env = "PREVIEW_SITE_NAME", default_value = DEFAULT_SITE_NAME)]
    pub site_name: String,

    /// Description for pages without their own metadata
    #[arg(long, env = "PREVIEW_SITE_DESCRIPTION", default_value = DEFAULT_SITE_DESCRIPTION)]
    pub site_description: String,

    /// og:locale value
    #[arg(long, env = "PREVIEW_LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// theme-color meta value
    #[arg(long, env = "PREVIEW_THEME_COLOR", default_value = DEFAULT_THEME_COLOR)]
    pub theme_color: String,
}

impl From<SiteArgs> for SiteConfig {
    fn from(args: SiteArgs) -> Self {
        Self {
            name: args.site_name,
            description: args.site_description,
            locale: args.locale,
            theme_color: args.theme_color,
        }
    }
}

/// Parse an origin URL from string.
fn parse_origin_arg(s: &str) -> Result<String, String> {
    parse_origin(s).ok_or_else(|| format!("invalid origin: {s} (expected http(s)://host[:port])"))
}
