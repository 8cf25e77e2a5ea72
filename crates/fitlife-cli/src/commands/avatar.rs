use crate::context::AppContext;
use anyhow::{Context, Result};
use std::path::Path;

pub async fn show(ctx: &AppContext) -> Result<()> {
    match ctx.avatars.current().await {
        Some(path) => println!("{}", path.display()),
        None => println!("No avatar cached"),
    }
    Ok(())
}

pub async fn set(ctx: &AppContext, source: &Path) -> Result<()> {
    let cached = ctx
        .avatars
        .persist_from(source)
        .await
        .with_context(|| format!("Failed to cache avatar from {}", source.display()))?;
    println!("Avatar cached at {}", cached.display());
    Ok(())
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    ctx.avatars.clear().await?;
    println!("Avatar removed");
    Ok(())
}
