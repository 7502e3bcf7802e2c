pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config);
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cli::cmd_serve(config).await,

        Commands::InitDb { drop } => cli::cmd_init_db(&config, drop).await,

        Commands::Forge => cli::cmd_forge(&config).await,

        Commands::Admin { username, password } => {
            cli::cmd_admin(&config, username, password).await
        }

        Commands::InitConfig => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}
