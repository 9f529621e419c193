//! User type Model - student, professor, staff and so on

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UserType record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserType {
    pub id: String,
    pub description: String,
    pub active: bool,
}

/// Create user type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeCreate {
    pub description: String,
    pub active: bool,
}

/// Update user type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for UserType {
    const COLLECTION: Collection = Collection::UserTypes;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for UserTypeCreate {
    type Record = UserType;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> UserType {
        UserType {
            id,
            description: self.description,
            active: self.active,
        }
    }
}
