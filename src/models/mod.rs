//! Record types stored in the collections.
//!
//! Each catalog entity comes with a `*Create` payload, turned into a record by
//! [`crate::core::Draft`], and a `*Update` payload whose `None` fields are left
//! untouched by [`crate::core::Repository::update`].

pub mod article;
pub mod brand;
pub mod cafeteria;
pub mod campus;
pub mod employee;
pub mod sale;
pub mod supplier;
pub mod user;
pub mod user_type;

pub use article::{Article, ArticleCreate, ArticleUpdate};
pub use brand::{Brand, BrandCreate, BrandUpdate};
pub use cafeteria::{Cafeteria, CafeteriaCreate, CafeteriaUpdate};
pub use campus::{Campus, CampusCreate, CampusUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate, Shift};
pub use sale::{Sale, SaleCreate, SaleLineItem, SaleStatus, SaleUpdate};
pub use supplier::{Supplier, SupplierCreate, SupplierUpdate};
pub use user::{User, UserCreate, UserUpdate};
pub use user_type::{UserType, UserTypeCreate, UserTypeUpdate};
