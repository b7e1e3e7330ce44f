//! # reel-cli
//!
//! Command-line dispatcher for the Reelgate catalog gateway.
//!
//! This is the main entry point for the `reelgate` binary. It handles
//! command parsing, sets up logging, and maps each command onto the catalog
//! gateway or the credential manager. Every gateway failure is rendered as a
//! distinct human-readable message with a nonzero exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use reel_core::error::GatewayResult;
use reel_core::types::{MediaType, TimeWindow};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Resilient movie catalog gateway and authenticated backend CLI
#[derive(Parser)]
#[command(name = "reelgate", version, about = "Movie catalog gateway CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an explicit reelgate.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the upstream movie catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage your favorites on the backend
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
    /// Obtain and verify a backend access token
    Login,
    /// Discard the stored backend access token
    Logout,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Show trending titles
    Trending {
        #[arg(long, default_value = "movie")]
        media: MediaType,
        #[arg(long, default_value = "week")]
        window: TimeWindow,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show recommendations for a movie
    Recommendations {
        movie_id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show full details for a movie
    Details { movie_id: i64 },
    /// Search the catalog by title
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Pre-warm the cache through the ordinary gateway operations
    Warm {
        /// Number of trending pages to warm
        #[arg(long, default_value_t = 2)]
        pages: u32,
        /// Movie ids whose details should be warmed
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
    },
}

#[derive(Subcommand)]
pub enum FavoriteCommands {
    /// List your favorites
    List,
    /// Add a movie to your favorites
    Add { tmdb_id: i64 },
    /// Delete a favorite by its backend id
    Delete { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    info!("starting reelgate v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&error));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> GatewayResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| reel_core::error::GatewayError::io("failed to create async runtime", e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.config.as_deref())?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "reel_cli={level},reel_gateway={level},reel_auth={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
