//! Database configuration module.
//!
//! Handles the `SQLite` connection and creation of the `collections` table. The
//! table definition is generated from the entity with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! model.

use crate::entities::CollectionEntity;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Fallback used when neither `DATABASE_URL` nor config.toml names a database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/cafeteria.sqlite?mode=rwc";

/// Resolves the database URL.
///
/// `DATABASE_URL` from the environment wins, then the configured value, then
/// [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(configured: Option<&str>) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    tracing::debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `collections` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut collection_table = schema.create_table_from_entity(CollectionEntity);
    collection_table.if_not_exists();

    db.execute(builder.build(&collection_table)).await?;

    Ok(())
}
