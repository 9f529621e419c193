//! Generic repository over one collection.
//!
//! [`Repository`] implements list/get/create/update/delete/search once for any
//! [`Record`]. Entity-specific behaviour is layered on top as inherent impls
//! for a concrete record type (see `core::article` and `core::directory`) or
//! as free functions (see `core::sale`). Every mutation is a full-collection
//! read-modify-write through [`crate::core::store`], guarded by the collection
//! version.

use crate::{
    core::store::{self, Collection, Snapshot},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

/// A record that lives in one of the store's collections.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Collection the record is stored in
    const COLLECTION: Collection;

    /// Unique identifier within the collection
    fn id(&self) -> &str;
}

/// Payload that becomes a record once the repository assigns an id.
///
/// `now` is the creation instant, for records that stamp a registration or
/// hire date.
pub trait Draft {
    /// Record produced by this draft
    type Record: Record;

    /// Builds the record with its assigned id.
    fn into_record(self, id: String, now: DateTime<Utc>) -> Self::Record;
}

/// Typed access to the collection of `T`, over any connection or transaction.
pub struct Repository<'c, C, T> {
    conn: &'c C,
    _record: PhantomData<fn() -> T>,
}

impl<'c, C, T> Repository<'c, C, T>
where
    C: ConnectionTrait,
    T: Record,
{
    /// Creates a repository bound to `conn`.
    #[must_use]
    pub const fn new(conn: &'c C) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    /// All records, in stored order.
    pub async fn all(&self) -> Result<Vec<T>> {
        Ok(self.snapshot().await?.items)
    }

    /// Looks a record up by id.
    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.all().await?.into_iter().find(|item| item.id() == id))
    }

    /// Number of records in the collection.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.snapshot().await?.items.len())
    }

    /// Records matching `predicate`, in stored order.
    pub async fn search<F>(&self, predicate: F) -> Result<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut items = self.all().await?;
        items.retain(|item| predicate(item));
        Ok(items)
    }

    /// Appends a new record built from `draft` and returns it.
    ///
    /// The id is derived from the current time in milliseconds, bumped past
    /// the highest numeric id already present so it stays unique.
    pub async fn create<D>(&self, draft: D) -> Result<T>
    where
        D: Draft<Record = T>,
    {
        self.create_at(draft, Utc::now()).await
    }

    /// [`Self::create`] with the creation instant supplied by the caller.
    pub(crate) async fn create_at<D>(&self, draft: D, now: DateTime<Utc>) -> Result<T>
    where
        D: Draft<Record = T>,
    {
        let Snapshot { mut items, version } = self.snapshot().await?;
        let record = draft.into_record(next_id(&items, now), now);

        items.push(record.clone());
        self.commit(&items, version).await?;
        tracing::debug!("Created {} record {}", T::COLLECTION, record.id());
        Ok(record)
    }

    /// Shallow-merges the fields `patch` serializes into the record `id`.
    ///
    /// Fields the patch omits keep their value; the id itself never changes.
    /// Returns `None` when no record has that id.
    pub async fn update<P>(&self, id: &str, patch: &P) -> Result<Option<T>>
    where
        P: Serialize + ?Sized,
    {
        let Snapshot { mut items, version } = self.snapshot().await?;
        let Some(index) = items.iter().position(|item| item.id() == id) else {
            return Ok(None);
        };

        let merged = merge_patch(&items[index], patch)?;
        items[index] = merged.clone();
        self.commit(&items, version).await?;
        Ok(Some(merged))
    }

    /// Removes the record `id`. Returns whether a record was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let Snapshot { mut items, version } = self.snapshot().await?;
        let before = items.len();
        items.retain(|item| item.id() != id);

        if items.len() == before {
            return Ok(false);
        }
        self.commit(&items, version).await?;
        tracing::debug!("Deleted {} record {}", T::COLLECTION, id);
        Ok(true)
    }

    pub(crate) async fn snapshot(&self) -> Result<Snapshot<T>> {
        store::load(self.conn, T::COLLECTION).await
    }

    pub(crate) async fn commit(&self, items: &[T], version: i64) -> Result<i64> {
        store::save(self.conn, T::COLLECTION, items, version).await
    }
}

fn next_id<T: Record>(items: &[T], now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_millis();
    let highest = items
        .iter()
        .filter_map(|item| item.id().parse::<i64>().ok())
        .max();

    match highest {
        Some(highest) if highest >= candidate => highest
            .checked_add(1)
            .map_or_else(|| suffixed_id(items, candidate), |next| next.to_string()),
        _ => candidate.to_string(),
    }
}

/// Non-numeric fallback once the numeric id space is used up.
fn suffixed_id<T: Record>(items: &[T], candidate: i64) -> String {
    let mut suffix = items.len();
    loop {
        let id = format!("{candidate}-{suffix}");
        if !items.iter().any(|item| item.id() == id) {
            return id;
        }
        suffix += 1;
    }
}

fn merge_patch<T, P>(record: &T, patch: &P) -> Result<T>
where
    T: Record,
    P: Serialize + ?Sized,
{
    let mut merged = serde_json::to_value(record)?;
    let serde_json::Value::Object(fields) = serde_json::to_value(patch)? else {
        return Err(Error::validation("Update payload must be an object"));
    };
    let Some(target) = merged.as_object_mut() else {
        return Err(Error::validation("Stored record is not an object"));
    };

    for (key, value) in fields {
        if key != "id" {
            target.insert(key, value);
        }
    }
    Ok(serde_json::from_value(merged)?)
}
