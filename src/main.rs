use cafeteria_ledger::{
    cli::{self, Cli},
    config::{self, database},
    core,
    errors::Result,
};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the application configuration
    let app_config = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::load_default_config()?
    };

    // 4. Connect and make sure the store's table exists
    let database_url = database::get_database_url(app_config.store.database_url.as_deref());
    let db = database::create_connection(&database_url)
        .await
        .inspect(|_| info!("Connected to {}", database_url))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed collections that do not exist yet
    if let Some(seed_file) = &app_config.store.seed_file {
        if seed_file.exists() {
            core::seed_from_file(&db, seed_file)
                .await
                .inspect_err(|e| error!("Failed to seed from {}: {}", seed_file.display(), e))?;
        } else {
            info!("Seed file {} not found, skipping", seed_file.display());
        }
    }

    // 6. Run the requested command
    cli::run(cli.command, &db)
        .await
        .inspect_err(|e| error!("Command failed: {}", e))
}
