//! Campus Model

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Campus record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    pub id: String,
    pub description: String,
    pub active: bool,
}

/// Create campus payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusCreate {
    pub description: String,
    pub active: bool,
}

/// Update campus payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Campus {
    const COLLECTION: Collection = Collection::Campuses;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for CampusCreate {
    type Record = Campus;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> Campus {
        Campus {
            id,
            description: self.description,
            active: self.active,
        }
    }
}
