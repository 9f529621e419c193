//! Collection store - the key-value layer everything else persists through.
//!
//! Each named collection is one row holding the whole collection as JSON.
//! Reads return a [`Snapshot`] carrying the row version. Writes name the
//! version they started from and fail with [`Error::Conflict`] if another
//! writer got there first, so a read-modify-write never silently overwrites
//! a concurrent change.

use crate::{
    entities::{CollectionColumn, CollectionEntity, collection},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr, prelude::*};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

/// The nine collections the store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `tiposUsuarios`
    UserTypes,
    /// `marcas`
    Brands,
    /// `campus`
    Campuses,
    /// `proveedores`
    Suppliers,
    /// `cafeterias`
    Cafeterias,
    /// `usuarios`
    Users,
    /// `empleados`
    Employees,
    /// `articulos`
    Articles,
    /// `ventas`
    Sales,
}

impl Collection {
    /// Every collection, in export order.
    pub const ALL: [Self; 9] = [
        Self::UserTypes,
        Self::Brands,
        Self::Campuses,
        Self::Suppliers,
        Self::Cafeterias,
        Self::Users,
        Self::Employees,
        Self::Articles,
        Self::Sales,
    ];

    /// Storage key of the collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::UserTypes => "tiposUsuarios",
            Self::Brands => "marcas",
            Self::Campuses => "campus",
            Self::Suppliers => "proveedores",
            Self::Cafeterias => "cafeterias",
            Self::Users => "usuarios",
            Self::Employees => "empleados",
            Self::Articles => "articulos",
            Self::Sales => "ventas",
        }
    }

    /// Looks a collection up by its storage key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// A collection as read from the store, plus the version it was read at.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    /// Records in stored order
    pub items: Vec<T>,
    /// Row version; 0 when the collection has never been written
    pub version: i64,
}

/// Reads a whole collection. A collection that was never written is empty.
pub async fn load<C, T>(conn: &C, collection: Collection) -> Result<Snapshot<T>>
where
    C: ConnectionTrait,
    T: DeserializeOwned,
{
    let row = CollectionEntity::find_by_id(collection.key()).one(conn).await?;
    let Some(row) = row else {
        return Ok(Snapshot {
            items: Vec::new(),
            version: 0,
        });
    };

    let items: Vec<T> = serde_json::from_str(&row.value)?;
    tracing::debug!(
        "Loaded {} records from '{}' at version {}",
        items.len(),
        collection,
        row.version
    );
    Ok(Snapshot {
        items,
        version: row.version,
    })
}

/// Writes a whole collection, provided it is still at `expected_version`.
///
/// Returns the new version.
///
/// # Errors
/// Returns [`Error::Conflict`] if the collection was written since it was read.
pub async fn save<C, T>(
    conn: &C,
    collection: Collection,
    items: &[T],
    expected_version: i64,
) -> Result<i64>
where
    C: ConnectionTrait,
    T: Serialize,
{
    let value = serde_json::to_string(items)?;
    let version = write_versioned(conn, collection, value, expected_version).await?;
    tracing::debug!(
        "Saved {} records to '{}' at version {}",
        items.len(),
        collection,
        version
    );
    Ok(version)
}

/// Reads a collection as an untyped JSON document, `None` if never written.
pub async fn read_raw<C>(conn: &C, collection: Collection) -> Result<Option<serde_json::Value>>
where
    C: ConnectionTrait,
{
    CollectionEntity::find_by_id(collection.key())
        .one(conn)
        .await?
        .map(|row| serde_json::from_str(&row.value))
        .transpose()
        .map_err(Into::into)
}

/// Replaces a collection with `document`, whatever version it is at.
pub async fn overwrite_raw<C>(
    conn: &C,
    collection: Collection,
    document: &serde_json::Value,
) -> Result<i64>
where
    C: ConnectionTrait,
{
    let value = serde_json::to_string(document)?;
    let current = CollectionEntity::find_by_id(collection.key())
        .one(conn)
        .await?
        .map_or(0, |row| row.version);
    write_versioned(conn, collection, value, current).await
}

/// Whether the collection has ever been written.
pub async fn exists<C>(conn: &C, collection: Collection) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(CollectionEntity::find_by_id(collection.key())
        .one(conn)
        .await?
        .is_some())
}

/// Drops a collection entirely. Returns whether it existed.
pub async fn remove<C>(conn: &C, collection: Collection) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = CollectionEntity::delete_by_id(collection.key())
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

async fn write_versioned<C>(
    conn: &C,
    collection: Collection,
    value: String,
    expected_version: i64,
) -> Result<i64>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let now = chrono::Utc::now();
    let conflict = || Error::Conflict {
        collection: collection.key().to_string(),
    };

    if expected_version == 0 {
        let row = collection::ActiveModel {
            key: Set(collection.key().to_string()),
            value: Set(value),
            version: Set(1),
            updated_at: Set(now),
        };
        return match CollectionEntity::insert(row)
            .exec_without_returning(conn)
            .await
        {
            Ok(_) => Ok(1),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::warn!("Concurrent first write to '{}'", collection);
                Err(conflict())
            }
            Err(err) => Err(err.into()),
        };
    }

    // Compare-and-swap on the version column
    let result = CollectionEntity::update_many()
        .col_expr(CollectionColumn::Value, Expr::value(value))
        .col_expr(
            CollectionColumn::Version,
            Expr::col(CollectionColumn::Version).add(1),
        )
        .col_expr(CollectionColumn::UpdatedAt, Expr::value(now))
        .filter(CollectionColumn::Key.eq(collection.key()))
        .filter(CollectionColumn::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        tracing::warn!(
            "Stale write to '{}' at version {}",
            collection,
            expected_version
        );
        return Err(conflict());
    }
    Ok(expected_version + 1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use serde_json::json;

    #[test]
    fn test_collection_keys_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_key(collection.key()), Some(collection));
        }
        assert_eq!(Collection::from_key("ventas"), Some(Collection::Sales));
        assert_eq!(Collection::from_key("unknown"), None);
    }

    #[tokio::test]
    async fn test_load_missing_collection_is_empty() -> Result<()> {
        let db = setup_test_db().await?;

        let snapshot: Snapshot<serde_json::Value> = load(&db, Collection::Brands).await?;
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.version, 0);
        assert!(!exists(&db, Collection::Brands).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let db = setup_test_db().await?;

        let items = vec![json!({"id": "1"}), json!({"id": "2"})];
        let version = save(&db, Collection::Brands, &items, 0).await?;
        assert_eq!(version, 1);

        let snapshot: Snapshot<serde_json::Value> = load(&db, Collection::Brands).await?;
        assert_eq!(snapshot.items, items);
        assert_eq!(snapshot.version, 1);

        let version = save(&db, Collection::Brands, &items[..1], 1).await?;
        assert_eq!(version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_write_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        save(&db, Collection::Articles, &[json!({"id": "1"})], 0).await?;

        // Two writers read version 1, the first one wins
        save(&db, Collection::Articles, &[json!({"id": "2"})], 1).await?;
        let result = save(&db, Collection::Articles, &[json!({"id": "3"})], 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Conflict { collection } if collection == "articulos"
        ));

        let stored = read_raw(&db, Collection::Articles).await?.unwrap();
        assert_eq!(stored, json!([{"id": "2"}]));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_first_write_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        save(&db, Collection::Sales, &[json!({"id": "1"})], 0).await?;

        let result = save(&db, Collection::Sales, &[json!({"id": "2"})], 0).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_overwrite_raw_ignores_version() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(overwrite_raw(&db, Collection::Campuses, &json!([])).await?, 1);
        assert_eq!(
            overwrite_raw(&db, Collection::Campuses, &json!([{"id": "9"}])).await?,
            2
        );
        assert_eq!(
            read_raw(&db, Collection::Campuses).await?,
            Some(json!([{"id": "9"}]))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_collection() -> Result<()> {
        let db = setup_test_db().await?;
        save(&db, Collection::Users, &[json!({"id": "1"})], 0).await?;

        assert!(remove(&db, Collection::Users).await?);
        assert!(!remove(&db, Collection::Users).await?);
        assert_eq!(read_raw(&db, Collection::Users).await?, None);

        Ok(())
    }
}
