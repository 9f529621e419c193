//! Entity module - Contains the SeaORM entity backing the collection store.

pub mod collection;

pub use collection::{
    Column as CollectionColumn, Entity as CollectionEntity, Model as CollectionModel,
};
