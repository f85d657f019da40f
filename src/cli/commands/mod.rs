//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod render;
mod serve;
mod sites;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};
use crate::sites::SiteKind;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Render and serve content-driven marketing sites")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Populate a site template with its content and print the HTML
    Render {
        /// Site kind
        #[arg(value_enum)]
        site: SiteKind,
        /// HTML template (default: the built-in template)
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Content document path or URL (default: next to the template)
        #[arg(long)]
        content: Option<String>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Date used to mark finished events (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Load and validate a content document without rendering
    Check {
        /// Site kind
        #[arg(value_enum)]
        site: SiteKind,
        /// Content document path or URL
        content: String,
    },

    /// Start web server for the configured sites
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: config `bind`, else 127.0.0.1:3030)
        bind: Option<String>,
    },

    /// List configured sites
    Sites,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let settings = load_settings(options).await.map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Render {
            site,
            template,
            content,
            out,
            today,
        } => {
            render::cmd_render(
                &settings,
                render::RenderArgs {
                    site,
                    template,
                    content,
                    out,
                    today,
                },
            )
            .await
        }
        Commands::Check { site, content } => check::cmd_check(&settings, site, &content).await,
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(settings, &bind).await
        }
        Commands::Sites => sites::cmd_sites(&settings),
    }
}
