//! Catalog lookup commands.
//!
//! Thin wrappers over the gateway operations: fetch, then render a compact
//! table of the first rows, the way the original helper script did.

use reel_core::error::GatewayResult;
use reel_core::types::{CatalogItem, MediaType, Page, TimeWindow};

use super::CommandContext;

/// Rows shown before a page is truncated in terminal output
const MAX_ROWS: usize = 10;

/// `reelgate catalog trending`
pub async fn trending(
    media: MediaType,
    window: TimeWindow,
    page: u32,
    ctx: &CommandContext,
) -> GatewayResult<()> {
    let result = ctx.gateway.trending(media, window, page).await?;
    render_page(&result, ctx);
    Ok(())
}

/// `reelgate catalog recommendations`
pub async fn recommendations(movie_id: i64, page: u32, ctx: &CommandContext) -> GatewayResult<()> {
    let result = ctx.gateway.recommendations(movie_id, page).await?;
    render_page(&result, ctx);
    Ok(())
}

/// `reelgate catalog details`
pub async fn details(movie_id: i64, ctx: &CommandContext) -> GatewayResult<()> {
    let item = ctx.gateway.details(movie_id).await?;

    ctx.output.step("🎬", &format!("{} (id {})", item.title, item.id));
    if let Some(date) = item.release_date {
        ctx.output.info(&format!("released: {}", date));
    }
    ctx.output.info(&format!("score: {:.1}", item.score));
    if !item.overview.is_empty() {
        ctx.output.info(&item.overview);
    }
    Ok(())
}

/// `reelgate catalog search`
pub async fn search(query: &str, page: u32, ctx: &CommandContext) -> GatewayResult<()> {
    let result = ctx.gateway.search(query, page).await?;
    if result.is_empty() {
        ctx.output.info("No matches found.");
        return Ok(());
    }
    render_page(&result, ctx);
    Ok(())
}

/// `reelgate catalog warm` — warm-up is an ordinary caller of the public
/// gateway operations, sharing the same cache-aside path as lookups.
pub async fn warm(pages: u32, ids: &[i64], ctx: &CommandContext) -> GatewayResult<()> {
    let trending = ctx
        .gateway
        .warm_trending(MediaType::Movie, TimeWindow::Day, pages)
        .await;
    let details = ctx.gateway.warm_details(ids).await;

    let warmed = trending.warmed + details.warmed;
    let failed = trending.failed + details.failed;
    if failed == 0 {
        ctx.output
            .success(&format!("warmed {} cache entries", warmed));
    } else {
        ctx.output.warn(&format!(
            "warmed {} cache entries, {} failed",
            warmed, failed
        ));
    }
    Ok(())
}

fn render_page(page: &Page, ctx: &CommandContext) {
    let rows: Vec<Vec<String>> = page
        .results
        .iter()
        .take(MAX_ROWS)
        .map(item_row)
        .collect();
    ctx.output.table(&["ID", "Title", "Release Date"], &rows);
    ctx.output.info(&format!(
        "page {} of {} ({} results shown)",
        page.page,
        page.total_pages,
        rows.len()
    ));
}

fn item_row(item: &CatalogItem) -> Vec<String> {
    vec![
        item.id.to_string(),
        item.title.clone(),
        item.release_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
    ]
}
