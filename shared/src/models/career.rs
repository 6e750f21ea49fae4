//! Careers Posting Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform careers posting, managed by administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPosting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub description: String,
    #[serde(default = "default_true")]
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerCreate {
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub description: String,
}

/// Update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
}
