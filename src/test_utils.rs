//! Shared test utilities for the cafeteria ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating catalog records with sensible defaults.

use crate::{
    core::Repository,
    errors::Result,
    models::{
        Article, ArticleCreate, Brand, BrandCreate, Employee, EmployeeCreate, Shift, Supplier,
        SupplierCreate, User, UserCreate, UserType, UserTypeCreate,
    },
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an active brand.
pub async fn create_test_brand(db: &DatabaseConnection, name: &str) -> Result<Brand> {
    Repository::<'_, _, Brand>::new(db)
        .create(BrandCreate {
            description: name.to_string(),
            active: true,
        })
        .await
}

/// Creates an active morning-shift employee.
pub async fn create_test_employee(db: &DatabaseConnection, name: &str) -> Result<Employee> {
    Repository::<'_, _, Employee>::new(db)
        .create(EmployeeCreate {
            name: name.to_string(),
            national_id: "001-1234567-8".to_string(),
            shift: Shift::Morning,
            commission_percent: 5.0,
            active: true,
        })
        .await
}

/// Creates an article with sensible defaults.
///
/// # Defaults
/// * price: 10.0, cost: 5.0
/// * stock: 10
/// * brand and supplier ids: `"1"`
pub async fn create_test_article(db: &DatabaseConnection, name: &str) -> Result<Article> {
    create_custom_article(db, name, 10.0, 10).await
}

/// Creates an article with custom price and stock.
pub async fn create_custom_article(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: u32,
) -> Result<Article> {
    Repository::<'_, _, Article>::new(db)
        .create(ArticleCreate {
            description: name.to_string(),
            brand_id: "1".to_string(),
            cost: price / 2.0,
            price,
            supplier_id: "1".to_string(),
            stock_quantity: stock,
            active: true,
        })
        .await
}

/// Everything a sale needs: who sells, who buys, and what.
pub struct SaleFixture {
    /// Database holding the fixture records
    pub db: DatabaseConnection,
    /// Active employee
    pub employee: Employee,
    /// Active customer
    pub user: User,
    /// Active article, stock 10, price 50
    pub article: Article,
}

/// Sets up a store with a user type, a customer, an employee, a brand, a
/// supplier and one article (stock 10, price 50).
pub async fn setup_sale_fixture() -> Result<SaleFixture> {
    let db = setup_test_db().await?;

    let user_type = Repository::<'_, _, UserType>::new(&db)
        .create(UserTypeCreate {
            description: "Student".to_string(),
            active: true,
        })
        .await?;
    let user = Repository::<'_, _, User>::new(&db)
        .create(UserCreate {
            name: "Test Customer".to_string(),
            national_id: "402-0000000-1".to_string(),
            user_type_id: user_type.id,
            credit_limit: 1000.0,
            active: true,
        })
        .await?;
    let employee = create_test_employee(&db, "Test Cashier").await?;

    let brand = create_test_brand(&db, "Test Brand").await?;
    let supplier = Repository::<'_, _, Supplier>::new(&db)
        .create(SupplierCreate {
            trade_name: "Test Supplier".to_string(),
            tax_id: "101-00000-1".to_string(),
            registered_at: None,
            active: true,
        })
        .await?;
    let article = Repository::<'_, _, Article>::new(&db)
        .create(ArticleCreate {
            description: "Coffee".to_string(),
            brand_id: brand.id,
            cost: 20.0,
            price: 50.0,
            supplier_id: supplier.id,
            stock_quantity: 10,
            active: true,
        })
        .await?;

    Ok(SaleFixture {
        db,
        employee,
        user,
        article,
    })
}
