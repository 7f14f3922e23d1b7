//! Article series models
//!
//! The series endpoint predates the shared pagination wrapper and returns
//! its rows under `data` without a page count.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QueryPairs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Serie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerieList {
    pub data: Vec<Serie>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerieCreate {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerieUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesQuery {
    pub limit: Option<u32>,
}

impl SeriesQuery {
    #[must_use]
    pub fn query_pairs(&self) -> QueryPairs {
        vec![("limit", self.limit.map(|v| v.to_string()))]
    }
}
