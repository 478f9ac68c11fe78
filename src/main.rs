use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Command};
use househunt_lookup::config::AppConfig;
use househunt_lookup::search::DEFAULT_LIMIT;
use househunt_lookup::{generator, server, CatalogCache};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "househunt_lookup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_file_path()?,
    };
    let mut config = AppConfig::load_from(&config_path)?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    let catalog = Arc::new(CatalogCache::new(config.data_path.clone()));

    match cli.command {
        Command::Build => {
            let loaded = catalog.get().await?;
            generator::generate_site(&loaded, &config.output_dir, config.search_limit)?;
            tracing::info!("✅ Site generated in {}/", config.output_dir.display());
        }
        Command::Serve { addr, rebuild } => {
            let loaded = catalog.get().await?;

            let index_file = config.output_dir.join("index.html");
            if rebuild || !index_file.exists() {
                tracing::info!("📦 Generating site...");
                generator::generate_site(&loaded, &config.output_dir, config.search_limit)?;
            } else {
                tracing::info!("✅ Using existing site in {}/", config.output_dir.display());
            }

            let addr = addr.unwrap_or(config.bind_addr);
            tracing::info!("✨ Ready! Open http://{} in your browser", addr);
            tracing::info!("Press Ctrl+C to stop");

            server::serve(addr, catalog, &config.output_dir).await?;
        }
        Command::Search { query, limit } => {
            let loaded = catalog.get().await?;
            let results = loaded
                .search_engine()
                .search(&query, limit.unwrap_or(DEFAULT_LIMIT));
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::InitConfig => {
            config.save_to(&config_path)?;
            tracing::info!("Wrote {}", config_path.display());
        }
    }

    Ok(())
}
