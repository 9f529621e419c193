//! Command-line interface - thin layer that parses arguments, calls into
//! [`crate::core`] and prints the results.

use crate::{
    core::{self, Cart, Collection, Repository},
    errors::{Error, Result},
    models::{Article, Sale},
};
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;

/// Cafeteria catalogs and sales
#[derive(Debug, Parser)]
#[command(name = "cafeteria-ledger", version, about)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, env = "CAFETERIA_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create tables, seed missing collections and show collection sizes
    Init,
    /// Write every collection as one JSON document
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Overwrite collections from a JSON document
    Import {
        /// Document produced by `export`
        file: PathBuf,
    },
    /// List articles and their stock
    Articles {
        /// Only active articles with stock left
        #[arg(long)]
        in_stock: bool,
    },
    /// List sales
    Sales,
    /// Record a sale
    Sell {
        /// Employee ringing up the sale
        #[arg(long)]
        employee: String,
        /// Customer
        #[arg(long)]
        user: String,
        /// Line item as ARTICLE_ID:QUANTITY; repeat for more lines
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<(String, u32)>,
    },
    /// Void a sale and restore its stock
    Void {
        /// Id of the sale to void
        sale_id: String,
    },
}

/// Executes `command` against `db`.
pub async fn run(command: Command, db: &DatabaseConnection) -> Result<()> {
    match command {
        Command::Init => {
            for collection in Collection::ALL {
                let count = core::store::read_raw(db, collection)
                    .await?
                    .and_then(|value| value.as_array().map(Vec::len));
                match count {
                    Some(count) => println!("{collection:<14} {count:>5} records"),
                    None => println!("{collection:<14}     - (empty)"),
                }
            }
        }
        Command::Export { output } => {
            let document = core::export_all(db).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, document)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{document}"),
            }
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            let written = core::import_all(db, &json).await?;
            println!("Imported {written} collections from {}", file.display());
        }
        Command::Articles { in_stock } => {
            let articles: Repository<'_, _, Article> = Repository::new(db);
            let list = if in_stock {
                articles.in_stock().await?
            } else {
                articles.all().await?
            };
            for article in list {
                println!(
                    "{:<15} {:<30} {:>10.2} {:>6}{}",
                    article.id,
                    article.description,
                    article.price,
                    article.stock_quantity,
                    if article.active { "" } else { "  (inactive)" }
                );
            }
        }
        Command::Sales => {
            let sales: Repository<'_, _, Sale> = Repository::new(db);
            for sale in sales.all().await? {
                println!(
                    "{:<15} {:<12} {} {:>10.2} {}",
                    sale.id,
                    sale.invoice_number,
                    sale.timestamp.format("%Y-%m-%d %H:%M"),
                    sale.total,
                    sale.status
                );
            }
        }
        Command::Sell {
            employee,
            user,
            items,
        } => {
            let articles: Repository<'_, _, Article> = Repository::new(db);
            let mut cart = Cart::new();
            for (article_id, quantity) in items {
                let article = articles
                    .get(&article_id)
                    .await?
                    .ok_or_else(|| Error::NotFound {
                        entity: "article",
                        id: article_id.clone(),
                    })?;
                cart.add(&article, quantity)?;
            }

            let sale = core::create_sale(db, cart.checkout(employee, user)).await?;
            println!(
                "Sale {} recorded as {} - total {:.2}",
                sale.id, sale.invoice_number, sale.total
            );
        }
        Command::Void { sale_id } => {
            if core::void_sale(db, &sale_id).await? {
                println!("Sale {sale_id} voided");
            } else {
                println!("Sale {sale_id} not found or already voided");
            }
        }
    }
    Ok(())
}

fn parse_item(raw: &str) -> std::result::Result<(String, u32), String> {
    let (article_id, quantity) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected ARTICLE_ID:QUANTITY, got '{raw}'"))?;
    if article_id.is_empty() {
        return Err(format!("missing article id in '{raw}'"));
    }
    let quantity = quantity
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity in '{raw}': {e}"))?;
    Ok((article_id.to_string(), quantity))
}
