//! Sale cart - collects line items before a sale is submitted.
//!
//! Prices are resolved when an article is added, so the ledger receives lines
//! that already carry their unit price and subtotal.

use crate::{
    errors::{Error, Result},
    models::{Article, SaleCreate, SaleLineItem},
};

/// Line items of a sale in progress.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<SaleLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `article`.
    ///
    /// Adding an article that is already in the cart grows its existing line.
    /// The stock check here is a courtesy to the operator; the ledger checks
    /// again when the sale is created.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `quantity` is zero
    /// - The article is inactive
    /// - The cart would hold more units than the article has in stock
    pub fn add(&mut self, article: &Article, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(Error::validation("Quantity must be greater than zero"));
        }
        if !article.active {
            return Err(Error::validation(format!(
                "Article '{}' is not active",
                article.description
            )));
        }

        let already = self
            .lines
            .iter()
            .find(|line| line.article_id == article.id)
            .map_or(0, |line| line.quantity);
        let requested = already.saturating_add(quantity);
        if requested > article.stock_quantity {
            return Err(Error::InsufficientStock {
                article_id: article.id.clone(),
                available: article.stock_quantity,
                requested,
            });
        }

        match self.lines.iter_mut().find(|line| line.article_id == article.id) {
            Some(line) => *line = SaleLineItem::for_article(article, requested),
            None => self.lines.push(SaleLineItem::for_article(article, quantity)),
        }
        Ok(())
    }

    /// Drops the line for `article_id`. Returns whether there was one.
    pub fn remove(&mut self, article_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.article_id != article_id);
        self.lines.len() != before
    }

    /// Sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.line_subtotal).sum()
    }

    /// Current lines, in the order articles were first added.
    #[must_use]
    pub fn lines(&self) -> &[SaleLineItem] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Turns the cart into a sale request for the given employee and customer.
    #[must_use]
    pub fn checkout(self, employee_id: impl Into<String>, user_id: impl Into<String>) -> SaleCreate {
        SaleCreate {
            employee_id: employee_id.into(),
            user_id: user_id.into(),
            items: self.lines,
        }
    }
}
