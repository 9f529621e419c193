//! Supplier Model

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub trade_name: String,
    /// Tax registration number (RNC)
    pub tax_id: String,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCreate {
    pub trade_name: String,
    pub tax_id: String,
    /// Defaults to the creation instant when absent
    pub registered_at: Option<DateTime<Utc>>,
    pub active: bool,
}

/// Update supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Supplier {
    const COLLECTION: Collection = Collection::Suppliers;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for SupplierCreate {
    type Record = Supplier;

    fn into_record(self, id: String, now: DateTime<Utc>) -> Supplier {
        Supplier {
            id,
            trade_name: self.trade_name,
            tax_id: self.tax_id,
            registered_at: self.registered_at.unwrap_or(now),
            active: self.active,
        }
    }
}
