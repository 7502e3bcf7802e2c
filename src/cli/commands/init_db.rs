use crate::config::Config;
use crate::db::Store;
use crate::services::provision;

pub async fn cmd_init_db(config: &Config, drop: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    provision::init_db(&store, drop).await?;

    if drop {
        println!("✓ Dropped existing tables.");
    }
    println!("✓ Database initialized.");
    Ok(())
}
