//! Sale Model
//!
//! A sale embeds its line items and freezes its total at creation. The only
//! change a sale ever sees afterwards is the one-way move from
//! [`SaleStatus::Completed`] to [`SaleStatus::Voided`].

use super::Article;
use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sale status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Completed,
    /// Terminal
    Voided,
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Voided => f.write_str("voided"),
        }
    }
}

/// One line of a sale. Not persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub article_id: String,
    pub quantity: u32,
    /// Article price at the moment the line was added
    pub unit_price: f64,
    pub line_subtotal: f64,
}

impl SaleLineItem {
    /// Builds a line, computing the subtotal from quantity and unit price.
    #[must_use]
    pub fn new(article_id: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            article_id: article_id.into(),
            quantity,
            unit_price,
            line_subtotal: f64::from(quantity) * unit_price,
        }
    }

    /// Builds a line priced at the article's current price.
    #[must_use]
    pub fn for_article(article: &Article, quantity: u32) -> Self {
        Self::new(article.id.clone(), quantity, article.price)
    }
}

/// Sale entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    /// Human-readable number, e.g. `F-007-2025`
    pub invoice_number: String,
    /// Employee reference (String ID)
    pub employee_id: String,
    /// Customer reference (String ID)
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<SaleLineItem>,
    /// Sum of line subtotals at creation; never recomputed
    pub total: f64,
    pub status: SaleStatus,
}

impl Sale {
    /// Whether the sale still counts towards revenue and stock.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }
}

/// Create sale payload, as submitted by the point of sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    pub employee_id: String,
    pub user_id: String,
    pub items: Vec<SaleLineItem>,
}

/// Update sale payload. The ledger only ever touches `status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
}

/// A validated sale waiting for its id.
#[derive(Debug, Clone)]
pub(crate) struct NewSale {
    pub invoice_number: String,
    pub employee_id: String,
    pub user_id: String,
    pub items: Vec<SaleLineItem>,
    pub total: f64,
}

impl Record for Sale {
    const COLLECTION: Collection = Collection::Sales;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for NewSale {
    type Record = Sale;

    fn into_record(self, id: String, now: DateTime<Utc>) -> Sale {
        Sale {
            id,
            invoice_number: self.invoice_number,
            employee_id: self.employee_id,
            user_id: self.user_id,
            timestamp: now,
            items: self.items,
            total: self.total,
            status: SaleStatus::Completed,
        }
    }
}
