use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use assetsync::app::AppContext;
use assetsync::cli::{commands, Cli, Commands};
use assetsync::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::All);

    if let Commands::InitConfig { path } = &command {
        commands::init_config(path)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    let ctx = AppContext::new(config)?;

    tracing::info!(
        "Syncing images from {} into {}",
        ctx.config.endpoint,
        ctx.config.images_dir().display()
    );

    let report = commands::sync(&ctx, command.kinds(), cli.dry_run)
        .await
        .context("Asset sync failed")?;

    if cli.fail_on_error && report.failures() > 0 {
        eprintln!("{} downloads failed", report.failures());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
