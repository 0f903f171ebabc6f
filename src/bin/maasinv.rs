use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use maasinv::cache::MemoizingFetcher;
use maasinv::cli::{InventoryService, MaasInvCli};
use maasinv::config::{self, Config};
use maasinv::maas::MaasClient;
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = MaasInvCli::parse();

    // stdout carries the inventory document, logs go to stderr
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let Some(mode) = cli.mode() else {
        eprintln!("{}", MaasInvCli::command().render_help());
        std::process::exit(1);
    };

    info!("Starting maasinv v{}", env!("CARGO_PKG_VERSION"));

    let config_path = config::resolve_path(cli.config.as_deref());
    let config = Config::load(&config_path)
        .await
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    debug!("Using cache slot {:?}", config.cache.path);

    let client = MaasClient::from_config(&config.maas).context("Failed to create MAAS client")?;
    let fetcher = MemoizingFetcher::new(
        config.cache.path.clone(),
        config.cache.staleness_window()?,
    );
    let service = InventoryService::new(client, fetcher);

    if cli.refresh {
        service.refresh().await?;
    }

    let document = service.run(&mode).await?;
    println!("{document}");

    Ok(())
}
