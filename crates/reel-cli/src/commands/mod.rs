//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking the shared `CommandContext`,
//! which owns the constructed gateway and credential manager. There is no
//! process-global state: everything a command touches is injected here,
//! which is also what makes the lower layers testable with fakes.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use reel_auth::{BackendSettings, CredentialManager, TokenStore};
use reel_config::ReelConfig;
use reel_core::error::{GatewayError, GatewayResult};
use reel_gateway::{CacheTtls, CatalogGateway, RetryPolicy, Transport};

use crate::output::OutputHandler;
use crate::{CatalogCommands, Commands, FavoriteCommands};

pub mod catalog;
pub mod favorites;
pub mod session;

/// Shared context for all commands
pub struct CommandContext {
    pub gateway: CatalogGateway<Transport>,
    pub credentials: CredentialManager,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Build the context from configuration: transport, gateway, credential
    /// manager and output handler.
    pub fn new(config_path: Option<&Path>) -> GatewayResult<Self> {
        let config = ReelConfig::load(config_path)?;

        let retry = RetryPolicy {
            max_retries: config.retry.max_retries,
            initial_delay: Duration::from_millis(config.retry.initial_delay_ms),
            max_delay: Duration::from_millis(config.retry.max_delay_ms),
            multiplier: config.retry.multiplier,
            request_timeout: Duration::from_secs(config.retry.request_timeout_secs),
        };
        let transport = Transport::with_policy(
            &config.upstream.base_url,
            &config.upstream.api_key,
            &config.upstream.language,
            retry,
        )?;
        let ttls = CacheTtls {
            trending: Duration::from_secs(config.cache.trending),
            recommendations: Duration::from_secs(config.cache.recommendations),
            search: Duration::from_secs(config.cache.search),
            details: Duration::from_secs(config.cache.details),
        };
        let gateway = CatalogGateway::new(transport, ttls);

        let store = TokenStore::new().ok_or_else(|| {
            GatewayError::config("token store", "could not determine a user data directory")
        })?;
        let credentials = CredentialManager::new(
            BackendSettings {
                base_url: config.backend.base_url.clone(),
                username: config.backend.username.clone(),
                password: config.backend.password.clone(),
                probe_path: config.backend.probe_path.clone(),
            },
            store,
        )?;

        Ok(Self {
            gateway,
            credentials,
            output: OutputHandler::new(),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> GatewayResult<()> {
    match command {
        Commands::Catalog { command } => match command {
            CatalogCommands::Trending {
                media,
                window,
                page,
            } => {
                info!("fetching trending {} titles ({})", media, window);
                catalog::trending(media, window, page, ctx).await
            }
            CatalogCommands::Recommendations { movie_id, page } => {
                info!("fetching recommendations for movie {}", movie_id);
                catalog::recommendations(movie_id, page, ctx).await
            }
            CatalogCommands::Details { movie_id } => {
                info!("fetching details for movie {}", movie_id);
                catalog::details(movie_id, ctx).await
            }
            CatalogCommands::Search { query, page } => {
                info!("searching catalog for '{}'", query);
                catalog::search(&query, page, ctx).await
            }
            CatalogCommands::Warm { pages, ids } => {
                info!("warming caches ({} trending pages, {} ids)", pages, ids.len());
                catalog::warm(pages, &ids, ctx).await
            }
        },
        Commands::Favorites { command } => match command {
            FavoriteCommands::List => favorites::list(ctx).await,
            FavoriteCommands::Add { tmdb_id } => favorites::add(tmdb_id, ctx).await,
            FavoriteCommands::Delete { id } => favorites::delete(id, ctx).await,
        },
        Commands::Login => session::login(ctx).await,
        Commands::Logout => session::logout(ctx),
    }
}
