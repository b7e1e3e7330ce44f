//! Session commands: obtain or discard the backend credential.

use reel_core::error::GatewayResult;

use super::CommandContext;

/// `reelgate login` — ensure a verified token exists, logging in if needed
pub async fn login(ctx: &CommandContext) -> GatewayResult<()> {
    ctx.credentials.ensure_token().await?;
    ctx.output.success("logged in, access token stored");
    Ok(())
}

/// `reelgate logout` — remove the stored credential entirely
pub fn logout(ctx: &CommandContext) -> GatewayResult<()> {
    ctx.credentials.invalidate()?;
    ctx.output.success("logged out, access token removed");
    Ok(())
}
