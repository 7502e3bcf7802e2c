use crate::config::Config;
use crate::db::Store;
use crate::services::provision::{self, DEMO_MOVIES, DEMO_PASSWORD};

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    println!("Generating demo data...");

    let store = Store::new(&config.general.database_path).await?;
    let user = provision::forge(&store, &config.security).await?;

    println!("✓ Created user '{}' (password: {DEMO_PASSWORD})", user.username);
    println!("✓ Added {} movies", DEMO_MOVIES.len());
    Ok(())
}
