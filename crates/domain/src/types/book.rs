//! Library book models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{QueryPairs, SortOrder};

/// Book referenced by articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreate {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Filters accepted by the book list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub author: Option<String>,
}

impl BookQuery {
    #[must_use]
    pub fn query_pairs(&self) -> QueryPairs {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("search", self.search.clone()),
            ("sortBy", self.sort_by.clone()),
            ("sortOrder", self.sort_order.map(|v| v.to_string())),
            ("author", self.author.clone()),
        ]
    }
}
