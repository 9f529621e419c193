//! Export, import and seeding of the whole store as one JSON document.
//!
//! The document is an object keyed by collection name. Import writes each
//! recognized collection verbatim; there is no schema check beyond the
//! document being valid JSON.

use crate::{
    core::store::{self, Collection},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::{Map, Value};
use std::path::Path;

/// Serializes all nine collections into one pretty-printed JSON object.
///
/// A collection that was never written is exported as `null`.
pub async fn export_all(db: &DatabaseConnection) -> Result<String> {
    let mut document = Map::new();
    for collection in Collection::ALL {
        let value = store::read_raw(db, collection).await?.unwrap_or(Value::Null);
        document.insert(collection.key().to_string(), value);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(document))?)
}

/// Overwrites every collection present in `json`. Returns how many were written.
///
/// Null values and unknown keys are skipped. All writes happen in one
/// transaction, so a failed import leaves the store as it was.
///
/// # Errors
/// Returns an error if `json` is not valid JSON ([`Error::Serialization`]) or
/// not a JSON object ([`Error::Validation`]).
pub async fn import_all(db: &DatabaseConnection, json: &str) -> Result<usize> {
    let written = write_document(db, json, false).await?;
    tracing::info!("Imported {} collections", written);
    Ok(written)
}

/// Writes the collections in `json` that do not exist in the store yet.
///
/// Used at startup to give a fresh store its initial catalogs without
/// touching data that is already there.
pub async fn seed_missing(db: &DatabaseConnection, json: &str) -> Result<usize> {
    let written = write_document(db, json, true).await?;
    if written > 0 {
        tracing::info!("Seeded {} collections", written);
    }
    Ok(written)
}

/// Reads a seed document from `path` and applies it with [`seed_missing`].
pub async fn seed_from_file<P: AsRef<Path>>(db: &DatabaseConnection, path: P) -> Result<usize> {
    let path_ref = path.as_ref();
    tracing::debug!("Seeding from {}", path_ref.display());
    let json = std::fs::read_to_string(path_ref)?;
    seed_missing(db, &json).await
}

async fn write_document(db: &DatabaseConnection, json: &str, only_missing: bool) -> Result<usize> {
    let Value::Object(document) = serde_json::from_str::<Value>(json)? else {
        return Err(Error::validation("Import document must be a JSON object"));
    };

    let txn = db.begin().await?;
    let mut written = 0;
    for (key, value) in &document {
        let Some(collection) = Collection::from_key(key) else {
            tracing::warn!("Skipping unknown collection '{}'", key);
            continue;
        };
        if value.is_null() {
            continue;
        }
        if only_missing && store::exists(&txn, collection).await? {
            continue;
        }
        store::overwrite_raw(&txn, collection, value).await?;
        written += 1;
    }
    txn.commit().await?;

    Ok(written)
}
