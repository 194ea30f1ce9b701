// ABOUTME: Server binary for the recipe graph API
// ABOUTME: Loads configuration from the environment, opens the store, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Graph Server Binary
//!
//! Starts the document API with token authentication and `SQLite` storage.

use anyhow::Result;
use clap::Parser;
use recipe_graph_server::{config::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-graph-server")]
#[command(about = "Recipe Graph Server - ingredient and recipe data API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url {
        config.database.url = recipe_graph_server::config::DatabaseUrl::parse_url(&url);
    }

    info!("Starting Recipe Graph Server");
    info!("{}", config.summary());

    let resources = server::build_resources(config).await?;

    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
