//! Cafeteria Model

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cafeteria entity, located on one campus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafeteria {
    pub id: String,
    pub description: String,
    /// Campus reference (String ID)
    pub campus_id: String,
    /// Name of the person in charge
    pub manager: String,
    pub active: bool,
}

/// Create cafeteria payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CafeteriaCreate {
    pub description: String,
    pub campus_id: String,
    pub manager: String,
    pub active: bool,
}

/// Update cafeteria payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CafeteriaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Cafeteria {
    const COLLECTION: Collection = Collection::Cafeterias;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for CafeteriaCreate {
    type Record = Cafeteria;

    fn into_record(self, id: String, _now: DateTime<Utc>) -> Cafeteria {
        Cafeteria {
            id,
            description: self.description,
            campus_id: self.campus_id,
            manager: self.manager,
            active: self.active,
        }
    }
}
