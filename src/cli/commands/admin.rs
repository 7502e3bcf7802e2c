use std::io::Write;

use crate::config::Config;
use crate::db::Store;
use crate::services::provision::{self, AdminOutcome};

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn cmd_admin(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username")?,
    };

    let password = match password {
        Some(p) => p,
        None => {
            let first = prompt("Password")?;
            let confirm = prompt("Repeat for confirmation")?;
            if first != confirm {
                println!("Passwords do not match.");
                return Ok(());
            }
            first
        }
    };

    let store = Store::new(&config.general.database_path).await?;
    let (user, outcome) =
        provision::provision_admin(&store, &config.security, &username, &password).await?;

    match outcome {
        AdminOutcome::Created => println!("✓ Created user '{}'", user.username),
        AdminOutcome::Updated => println!("✓ Updated user '{}'", user.username),
    }
    Ok(())
}
