//! CLI module - Command-line interface for Watchlist
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a small shared movie watchlist
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create the database tables
    #[command(name = "init-db")]
    InitDb {
        /// Drop existing tables first
        #[arg(long)]
        drop: bool,
    },

    /// Reset the database and load demo data
    Forge,

    /// Create the admin user, or update its credentials
    Admin {
        /// Login username
        #[arg(long)]
        username: Option<String>,
        /// Login password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(name = "init-config", alias = "init")]
    InitConfig,
}

pub use commands::*;
