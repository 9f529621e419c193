//! Employee Model

use crate::core::{Collection, Draft, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work shift (tanda) an employee is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        };
        f.write_str(label)
    }
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub national_id: String,
    pub shift: Shift,
    /// Commission in percentage (e.g., 5.0 = 5%)
    pub commission_percent: f64,
    /// Stamped when the employee is created
    pub hired_at: DateTime<Utc>,
    pub active: bool,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub name: String,
    pub national_id: String,
    pub shift: Shift,
    pub commission_percent: f64,
    pub active: bool,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for EmployeeCreate {
    type Record = Employee;

    fn into_record(self, id: String, now: DateTime<Utc>) -> Employee {
        Employee {
            id,
            name: self.name,
            national_id: self.national_id,
            shift: self.shift,
            commission_percent: self.commission_percent,
            hired_at: now,
            active: self.active,
        }
    }
}
