//! User Model - cafeteria customers (students, professors, staff)

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// National identity document number (cédula)
    pub national_id: String,
    /// User type reference (String ID)
    pub user_type_id: String,
    pub credit_limit: f64,
    /// Stamped when the user is created
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub national_id: String,
    pub user_type_id: String,
    pub credit_limit: f64,
    pub active: bool,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for UserCreate {
    type Record = User;

    fn into_record(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            national_id: self.national_id,
            user_type_id: self.user_type_id,
            credit_limit: self.credit_limit,
            registered_at: now,
            active: self.active,
        }
    }
}
