//! Brand Model

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Brand record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub description: String,
    pub active: bool,
}

/// Create brand payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandCreate {
    pub description: String,
    pub active: bool,
}

/// Update brand payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Brand {
    const COLLECTION: Collection = Collection::Brands;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for BrandCreate {
    type Record = Brand;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> Brand {
        Brand {
            id,
            description: self.description,
            active: self.active,
        }
    }
}
