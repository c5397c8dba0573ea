use std::path::Path;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::{AssetKind, BatchReport, FetchTask};

/// Resolve every kind, then download each kind's images in turn.
///
/// All lists are resolved before the first download so that an upstream
/// failure aborts the run with nothing written. Per-image failures only show
/// up in the returned report.
pub async fn sync(ctx: &AppContext, kinds: &[AssetKind], dry_run: bool) -> Result<BatchReport> {
    let mut resolved: Vec<(AssetKind, Vec<FetchTask>)> = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        println!("Fetching {} list...", kind);
        let tasks = ctx.resolver.resolve(kind).await?;
        println!("Found {} {}", tasks.len(), found_label(kind));
        resolved.push((kind, tasks));
    }

    let mut total = BatchReport::default();

    for (kind, tasks) in resolved {
        if dry_run {
            list_pending(ctx, kind, tasks).await?;
            continue;
        }

        ctx.store.ensure_dir(&ctx.config.kind_dir(kind)).await?;

        println!("\nDownloading {} images...", kind);
        let report = ctx.bulk_fetcher.run_batch(tasks).await;
        println!("  {}", report);
        tracing::info!("{} images: {}", kind, report);

        total.merge(&report);
    }

    if !dry_run {
        println!("\nDone: {}", total);
    }

    Ok(total)
}

async fn list_pending(ctx: &AppContext, kind: AssetKind, tasks: Vec<FetchTask>) -> Result<()> {
    let pending = ctx.bulk_fetcher.pending(tasks).await?;

    println!("\n{} {} images to download", pending.len(), kind);
    for task in pending {
        println!("  {} -> {}", task.source_url, task.destination.display());
    }

    Ok(())
}

fn found_label(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Player => "unique players",
        AssetKind::Tournament => "tournaments with images",
    }
}

pub fn init_config(path: &Path) -> Result<()> {
    Config::write_default(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
