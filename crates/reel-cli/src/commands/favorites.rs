//! Favorites commands against the protected backend.
//!
//! Every call goes through `CredentialManager::call_authenticated`, which
//! applies the retry-once-on-401 rule transparently.

use reqwest::Method;
use serde_json::json;

use reel_core::error::GatewayResult;

use super::CommandContext;

/// `reelgate favorites list`
pub async fn list(ctx: &CommandContext) -> GatewayResult<()> {
    let payload = ctx
        .credentials
        .call_authenticated(Method::GET, "/api/favorites/", None)
        .await?;

    let favorites = payload.as_array().cloned().unwrap_or_default();
    if favorites.is_empty() {
        ctx.output.info("No favorites found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = favorites
        .iter()
        .map(|fav| {
            vec![
                fav["id"].to_string(),
                fav["tmdb_id"].to_string(),
                fav["title"].as_str().unwrap_or("Unknown").to_string(),
            ]
        })
        .collect();
    ctx.output.table(&["ID", "TMDb ID", "Title"], &rows);
    Ok(())
}

/// `reelgate favorites add`
pub async fn add(tmdb_id: i64, ctx: &CommandContext) -> GatewayResult<()> {
    let payload = ctx
        .credentials
        .call_authenticated(
            Method::POST,
            "/api/favorites/",
            Some(&json!({ "tmdb_id": tmdb_id })),
        )
        .await?;

    let title = payload["title"].as_str().unwrap_or("Unknown");
    ctx.output
        .success(&format!("added favorite: {} (tmdb_id={})", title, tmdb_id));
    Ok(())
}

/// `reelgate favorites delete`
pub async fn delete(id: i64, ctx: &CommandContext) -> GatewayResult<()> {
    ctx.credentials
        .call_authenticated(Method::DELETE, &format!("/api/favorites/{}/", id), None)
        .await?;

    ctx.output.success(&format!("deleted favorite with id {}", id));
    Ok(())
}
