//! Default seed script - clears the user collection and adds the sample users
//!
//! Run with:
//! ```
//! MEMBER_DB_PASSWORD=... cargo run -p seed-data --bin seed
//! ```

use seed_data::{config::StoreConfig, db::Seeder, fixtures::sample_users};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = StoreConfig::load()?;
    let server = config.server_address()?;
    tracing::info!(
        "Seeding collection {} in database {} at {}",
        config.collection,
        config.database,
        server
    );

    let mut seeder = Seeder::connect(&config)?;
    seeder.repository().ensure_collection().await?;

    seeder.clear().await?;
    seeder.seed().await?;

    tracing::info!("Seed completed!");
    tracing::info!("  Users: {}", sample_users().len());

    Ok(())
}
