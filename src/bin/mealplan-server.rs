// ABOUTME: Server binary for the meal-planning web service
// ABOUTME: Loads configuration, initializes logging and storage, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! # Mealplan Server Binary
//!
//! Starts the meal-planning web service with user authentication, recipe
//! storage, and plan generation.

use anyhow::Result;
use clap::Parser;
use mealplan_server::{
    config::ServerConfig, database::Database, logging, resources::ServerResources, server,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mealplan-server")]
#[command(about = "Meal-planning web service")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Mealplan Server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(&config, database));

    server::run(&config, resources).await
}
