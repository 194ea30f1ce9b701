// ABOUTME: recipe-admin - command-line tool for recipe graph server administration
// ABOUTME: Creates and disables token-auth users and lists stored ingredients and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create a user that can call tokenAuth
//! recipe-admin user create --username chef --password secret
//!
//! # Reset the password of an existing user (and reactivate it)
//! recipe-admin user create --username chef --password new-secret --force
//!
//! # Stop a user from obtaining or refreshing tokens
//! recipe-admin user deactivate --username chef
//!
//! # List ingredients whose name contains "egg"
//! recipe-admin ingredient list --name egg
//!
//! # List recipes with their ingredient counts
//! recipe-admin recipe list
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipe_graph_server::config::{DatabaseUrl, ServerConfig};
use recipe_graph_server::database::Database;
use std::env;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "recipe-admin",
    about = "Recipe Graph Server administration CLI",
    long_about = "Manage token-auth users and inspect stored ingredients and recipes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// User management commands
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Ingredient inspection commands
    Ingredient {
        #[command(subcommand)]
        action: ListCommand,
    },

    /// Recipe inspection commands
    Recipe {
        #[command(subcommand)]
        action: ListCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user allowed to obtain tokens
    Create {
        /// Login name
        #[arg(long)]
        username: String,

        /// Password (stored as a bcrypt hash)
        #[arg(long)]
        password: String,

        /// Reset the password and reactivate if the user already exists
        #[arg(long)]
        force: bool,
    },

    /// Prevent a user from obtaining or refreshing tokens
    Deactivate {
        /// Login name
        #[arg(long)]
        username: String,
    },

    /// Allow a deactivated user to obtain tokens again
    Activate {
        /// Login name
        #[arg(long)]
        username: String,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    /// List records, optionally filtered by a case-insensitive name substring
    List {
        /// Name substring to match
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let database_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .map_or_else(DatabaseUrl::default, |url| DatabaseUrl::parse_url(&url));

    if let DatabaseUrl::SQLite { path } = &database_url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Connecting to database: {}", database_url);
    let database = Database::new(
        &database_url.to_connection_string(),
        ServerConfig::default().database.max_connections,
    )
    .await?;

    match cli.command {
        Command::User { action } => match action {
            UserCommand::Create {
                username,
                password,
                force,
            } => commands::user::create(&database, &username, password, force).await?,
            UserCommand::Deactivate { username } => {
                commands::user::set_active(&database, &username, false).await?;
            }
            UserCommand::Activate { username } => {
                commands::user::set_active(&database, &username, true).await?;
            }
        },
        Command::Ingredient {
            action: ListCommand::List { name },
        } => commands::catalog::list_ingredients(&database, name).await?,
        Command::Recipe {
            action: ListCommand::List { name },
        } => commands::catalog::list_recipes(&database, name).await?,
    }

    Ok(())
}
