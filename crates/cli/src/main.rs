//! `bomwright` command-line entry point
//!
//! Rescales a BOM against the configured backend and prints the outcome as
//! JSON on stdout.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Cli, Commands, RescaleArgs};
use bomwright_core::{RescaleService, ScrapCatalogCache};
use bomwright_domain::constants::MSG_UPDATE_SUCCEEDED;
use bomwright_domain::Config;
use bomwright_infra::config::{load as load_config, load_api_token};
use bomwright_infra::{
    AccessTokenProvider, ApiClient, ApiClientConfig, HttpBomStore, HttpScrapStore,
    StaticTokenProvider,
};
use clap::Parser;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { command: Commands::Rescale(args) } = Cli::parse();

    let dotenv = dotenvy::dotenv();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_tracing(&config.logging);
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "failed to load .env file"),
    }

    match run(&config, args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, args: RescaleArgs) -> Result<ExitCode> {
    let service = build_service(config).await?;

    if args.dry_run {
        return match service.preview(&args.bom_id, args.target_quantity()).await {
            Ok(plan) => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{}", err.user_message());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    match service.rescale(&args.bom_id, args.target_quantity()).await {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            eprintln!("{MSG_UPDATE_SUCCEEDED}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn build_service(config: &Config) -> Result<RescaleService> {
    let auth = load_api_token()
        .and_then(StaticTokenProvider::new)
        .map(|provider| Arc::new(provider) as Arc<dyn AccessTokenProvider>);
    if auth.is_none() {
        warn!("no API token configured, requests will be unauthenticated");
    }

    let client = ApiClient::new(ApiClientConfig::from(&config.api), auth)
        .context("failed to build API client")?;
    let client = Arc::new(client);
    info!(base_url = %client.base_url(), "API client ready");

    let mut service = RescaleService::new(
        Arc::new(HttpBomStore::new(client.clone())),
        Arc::new(HttpScrapStore::new(client)),
    )
    .with_missing_stock_policy(config.rescale.missing_stock_policy);

    if config.rescale.scrap_catalog_enabled {
        service = service.with_catalog(Arc::new(ScrapCatalogCache::new()));
        match service.refresh_catalog(config.rescale.scrap_catalog_limit).await {
            Ok(records) => info!(records, "scrap catalog loaded"),
            Err(err) => warn!(error = %err, "scrap catalog unavailable, continuing without it"),
        }
    }

    Ok(service)
}
