//! Core business logic - framework-agnostic store, catalogs and sale ledger.

pub mod article;
pub mod cart;
pub mod directory;
pub mod repository;
pub mod sale;
pub mod store;
pub mod transfer;

pub use article::create_article;
pub use cart::Cart;
pub use directory::Activatable;
pub use repository::{Draft, Record, Repository};
pub use sale::{create_sale, void_sale};
pub use store::{Collection, Snapshot};
pub use transfer::{export_all, import_all, seed_from_file, seed_missing};
