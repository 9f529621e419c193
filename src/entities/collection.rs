//! Collection entity - One row per named collection in the key-value store.
//!
//! The `value` column holds the whole collection as a JSON array. Writers bump
//! `version` on every change so that a stale read-modify-write can be detected.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Collection database model - stores one JSON document per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collections")]
pub struct Model {
    /// Collection key (e.g. `"articulos"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized JSON document
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// Incremented on every write
    pub version: i64,
    /// When this collection was last written
    pub updated_at: DateTimeUtc,
}

/// `Collection` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
