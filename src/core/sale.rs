//! Sale ledger - Records sales and keeps article stock consistent with them.
//!
//! Creating a sale and voiding a sale each run inside one database
//! transaction. A sale is checked against current stock as a whole before
//! anything is written, so a rejected sale leaves no trace: no sale record and
//! no stock movement. Voiding puts every line's units back and marks the sale
//! voided; the total and the lines are never touched again.

use crate::{
    core::Repository,
    errors::{Error, Result},
    models::{
        Article, Employee, Sale, SaleCreate, SaleLineItem, SaleStatus, SaleUpdate, User,
        sale::NewSale,
    },
};
use chrono::{DateTime, Datelike, Local, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

/// Creates a sale, assigns its invoice number and takes its units out of stock.
///
/// # Errors
/// Returns an error if:
/// - The employee, the customer or the item list is missing, or a line has a
///   zero quantity ([`Error::Validation`])
/// - The employee or the customer does not exist or is inactive
///   ([`Error::Validation`])
/// - A line references an unknown article ([`Error::NotFound`])
/// - Any article has fewer units than the sale asks for
///   ([`Error::InsufficientStock`])
/// - A collection was modified concurrently ([`Error::Conflict`])
pub async fn create_sale(db: &DatabaseConnection, request: SaleCreate) -> Result<Sale> {
    validate_request(&request)?;

    let txn = db.begin().await?;

    let employees: Repository<'_, _, Employee> = Repository::new(&txn);
    match employees.get(&request.employee_id).await? {
        Some(employee) if employee.active => {}
        _ => {
            return Err(Error::validation(format!(
                "Employee {} does not exist or is not active",
                request.employee_id
            )));
        }
    }

    let users: Repository<'_, _, User> = Repository::new(&txn);
    match users.get(&request.user_id).await? {
        Some(user) if user.active => {}
        _ => {
            return Err(Error::validation(format!(
                "User {} does not exist or is not active",
                request.user_id
            )));
        }
    }

    let articles: Repository<'_, _, Article> = Repository::new(&txn);
    check_stock(&articles.all().await?, &request.items)?;

    // One instant for both the invoice year and the sale timestamp
    let now = Utc::now();
    let sales: Repository<'_, _, Sale> = Repository::new(&txn);
    let invoice_year = now.with_timezone(&Local).year();
    let invoice_number = next_invoice_number(&sales.all().await?, invoice_year)?;

    // Subtotals are recomputed so the stored lines always add up to the total
    let items: Vec<SaleLineItem> = request
        .items
        .into_iter()
        .map(|line| SaleLineItem::new(line.article_id, line.quantity, line.unit_price))
        .collect();
    let total = items.iter().map(|line| line.line_subtotal).sum();

    let sale = sales
        .create_at(
            NewSale {
                invoice_number,
                employee_id: request.employee_id,
                user_id: request.user_id,
                items,
                total,
            },
            now,
        )
        .await?;

    for line in &sale.items {
        if !articles.decrease_stock(&line.article_id, line.quantity).await? {
            // Dropping the transaction discards the sale and earlier decrements
            let available = articles
                .get(&line.article_id)
                .await?
                .map_or(0, |a| a.stock_quantity);
            return Err(Error::InsufficientStock {
                article_id: line.article_id.clone(),
                available,
                requested: line.quantity,
            });
        }
    }

    txn.commit().await?;

    tracing::info!(
        "Sale {} ({}) recorded: {} lines, total {:.2}",
        sale.invoice_number,
        sale.id,
        sale.items.len(),
        sale.total
    );
    Ok(sale)
}

/// Voids a completed sale and returns its units to stock.
///
/// Returns `false` if the sale does not exist or was already voided. Lines
/// whose article has since been deleted are skipped.
pub async fn void_sale(db: &DatabaseConnection, sale_id: &str) -> Result<bool> {
    let txn = db.begin().await?;
    let sales: Repository<'_, _, Sale> = Repository::new(&txn);

    let Some(sale) = sales.get(sale_id).await? else {
        tracing::warn!("Cannot void unknown sale {}", sale_id);
        return Ok(false);
    };
    if sale.status == SaleStatus::Voided {
        tracing::warn!("Sale {} is already voided", sale.invoice_number);
        return Ok(false);
    }

    let articles: Repository<'_, _, Article> = Repository::new(&txn);
    for line in &sale.items {
        if !articles.increase_stock(&line.article_id, line.quantity).await? {
            tracing::debug!(
                "Article {} no longer exists, not restoring {} units",
                line.article_id,
                line.quantity
            );
        }
    }

    let voided = SaleUpdate {
        status: Some(SaleStatus::Voided),
    };
    if sales.update(sale_id, &voided).await?.is_none() {
        return Ok(false);
    }

    txn.commit().await?;

    tracing::info!("Sale {} ({}) voided", sale.invoice_number, sale.id);
    Ok(true)
}

impl<C> Repository<'_, C, Sale>
where
    C: ConnectionTrait,
{
    /// Sales whose timestamp falls within `[from, to]`.
    pub async fn by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Sale>> {
        self.search(|sale| sale.timestamp >= from && sale.timestamp <= to)
            .await
    }

    /// Sales made to customer `user_id`.
    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Sale>> {
        self.search(|sale| sale.user_id == user_id).await
    }

    /// Sales rung up by employee `employee_id`.
    pub async fn by_employee(&self, employee_id: &str) -> Result<Vec<Sale>> {
        self.search(|sale| sale.employee_id == employee_id).await
    }
}

fn validate_request(request: &SaleCreate) -> Result<()> {
    if request.employee_id.trim().is_empty() {
        return Err(Error::validation("An employee must be selected"));
    }
    if request.user_id.trim().is_empty() {
        return Err(Error::validation("A customer must be selected"));
    }
    if request.items.is_empty() {
        return Err(Error::validation("A sale needs at least one article"));
    }
    if let Some(line) = request.items.iter().find(|line| line.quantity == 0) {
        return Err(Error::validation(format!(
            "Quantity for article {} must be greater than zero",
            line.article_id
        )));
    }
    if let Some(line) = request
        .items
        .iter()
        .find(|line| !line.unit_price.is_finite() || line.unit_price < 0.0)
    {
        return Err(Error::validation(format!(
            "Unit price for article {} must be a non-negative number, got {}",
            line.article_id, line.unit_price
        )));
    }

    // Non-finite amounts serialize as null and would make the sales unreadable
    let total: f64 = request
        .items
        .iter()
        .map(|line| f64::from(line.quantity) * line.unit_price)
        .sum();
    if !total.is_finite() {
        return Err(Error::validation("Sale total is out of range"));
    }
    Ok(())
}

/// Checks every article can cover the total quantity the sale asks of it.
fn check_stock(articles: &[Article], lines: &[SaleLineItem]) -> Result<()> {
    let mut requested: HashMap<&str, u32> = HashMap::new();
    for line in lines {
        let entry = requested.entry(line.article_id.as_str()).or_insert(0);
        *entry = entry.saturating_add(line.quantity);
    }

    for line in lines {
        let Some(article) = articles.iter().find(|a| a.id == line.article_id) else {
            return Err(Error::NotFound {
                entity: "article",
                id: line.article_id.clone(),
            });
        };
        let wanted = requested[line.article_id.as_str()];
        if wanted > article.stock_quantity {
            return Err(Error::InsufficientStock {
                article_id: article.id.clone(),
                available: article.stock_quantity,
                requested: wanted,
            });
        }
    }
    Ok(())
}

/// `F-<seq>-<year>`, with `seq` one past both the number of sales and the
/// highest sequence already issued.
fn next_invoice_number(existing: &[Sale], year: i32) -> Result<String> {
    let highest = existing
        .iter()
        .filter_map(|sale| invoice_sequence(&sale.invoice_number))
        .max()
        .unwrap_or(0);
    let sequence = highest
        .max(existing.len())
        .checked_add(1)
        .ok_or_else(|| Error::validation("Invoice sequence is exhausted"))?;
    Ok(format!("F-{sequence:03}-{year}"))
}

fn invoice_sequence(invoice_number: &str) -> Option<usize> {
    invoice_number
        .strip_prefix("F-")?
        .split('-')
        .next()?
        .parse()
        .ok()
}
