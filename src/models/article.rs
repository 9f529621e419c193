//! Article Model - purchasable items with a price and a stock count.

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub description: String,
    /// Brand reference (String ID)
    pub brand_id: String,
    pub cost: f64,
    /// Sale price per unit
    pub price: f64,
    /// Supplier reference (String ID)
    pub supplier_id: String,
    /// Units on hand; only the sale ledger changes it after creation
    pub stock_quantity: u32,
    pub active: bool,
}

/// Create article payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCreate {
    pub description: String,
    pub brand_id: String,
    pub cost: f64,
    pub price: f64,
    pub supplier_id: String,
    pub stock_quantity: u32,
    pub active: bool,
}

/// Update article payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Article {
    const COLLECTION: Collection = Collection::Articles;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for ArticleCreate {
    type Record = Article;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> Article {
        Article {
            id,
            description: self.description,
            brand_id: self.brand_id,
            cost: self.cost,
            price: self.price,
            supplier_id: self.supplier_id,
            stock_quantity: self.stock_quantity,
            active: self.active,
        }
    }
}
