//! Article business logic - stock adjustment and catalog lookups.
//!
//! Stock is only ever changed through [`Repository::decrease_stock`] and
//! [`Repository::increase_stock`]. Because `stock_quantity` is unsigned and a
//! decrease that would go below zero is declined, the stock of an article can
//! never become negative.

use crate::{
    core::{Repository, store::Snapshot},
    errors::{Error, Result},
    models::{Article, ArticleCreate},
};
use sea_orm::ConnectionTrait;

impl<C> Repository<'_, C, Article>
where
    C: ConnectionTrait,
{
    /// Takes `quantity` units out of stock.
    ///
    /// Returns `false` and leaves the article untouched if it does not exist
    /// or holds fewer than `quantity` units.
    pub async fn decrease_stock(&self, article_id: &str, quantity: u32) -> Result<bool> {
        let Snapshot { mut items, version } = self.snapshot().await?;
        let Some(article) = items.iter_mut().find(|a| a.id == article_id) else {
            tracing::warn!("Cannot decrease stock of unknown article {}", article_id);
            return Ok(false);
        };

        let Some(remaining) = article.stock_quantity.checked_sub(quantity) else {
            tracing::warn!(
                "Declined stock decrease for article {}: {} on hand, {} requested",
                article_id,
                article.stock_quantity,
                quantity
            );
            return Ok(false);
        };

        article.stock_quantity = remaining;
        self.commit(&items, version).await?;
        tracing::debug!("Article {} stock is now {}", article_id, remaining);
        Ok(true)
    }

    /// Puts `quantity` units back into stock.
    ///
    /// Returns `false` only if the article no longer exists.
    pub async fn increase_stock(&self, article_id: &str, quantity: u32) -> Result<bool> {
        let Snapshot { mut items, version } = self.snapshot().await?;
        let Some(article) = items.iter_mut().find(|a| a.id == article_id) else {
            return Ok(false);
        };

        article.stock_quantity = article.stock_quantity.saturating_add(quantity);
        let stock = article.stock_quantity;
        self.commit(&items, version).await?;
        tracing::debug!("Article {} stock is now {}", article_id, stock);
        Ok(true)
    }

    /// Articles supplied by `supplier_id`.
    pub async fn by_supplier(&self, supplier_id: &str) -> Result<Vec<Article>> {
        self.search(|a| a.supplier_id == supplier_id).await
    }

    /// Articles of brand `brand_id`.
    pub async fn by_brand(&self, brand_id: &str) -> Result<Vec<Article>> {
        self.search(|a| a.brand_id == brand_id).await
    }

    /// Active articles with at least one unit on hand - what the point of sale offers.
    pub async fn in_stock(&self) -> Result<Vec<Article>> {
        self.search(|a| a.active && a.stock_quantity > 0).await
    }
}

/// Creates an article after checking its cost and price.
///
/// # Errors
/// Returns an error if:
/// - The description is empty or whitespace-only
/// - The cost or price is negative or not finite (NaN, infinity)
/// - The store write fails
pub async fn create_article<C>(
    articles: &Repository<'_, C, Article>,
    mut draft: ArticleCreate,
) -> Result<Article>
where
    C: ConnectionTrait,
{
    if draft.description.trim().is_empty() {
        return Err(Error::validation("Article description cannot be empty"));
    }

    for (label, amount) in [("cost", draft.cost), ("price", draft.price)] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::validation(format!(
                "Article {label} must be a non-negative number, got {amount}"
            )));
        }
    }

    draft.description = draft.description.trim().to_string();
    articles.create(draft).await
}
