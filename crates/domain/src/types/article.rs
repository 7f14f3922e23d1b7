//! Blog article models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QueryPairs;
use crate::impl_wire_enum_conversions;

/// Publication state of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
}

impl_wire_enum_conversions!(ArticleStatus {
    Draft => "draft",
    Published => "published",
});

/// Blog article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub status: ArticleStatus,
    #[serde(default)]
    pub related_book_ids: Vec<String>,
}

/// Payload for `POST /backoffice/articles`; ids are client-generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCreate {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: ArticleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_book_ids: Option<Vec<String>>,
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_book_ids: Option<Vec<String>>,
}

/// Filters accepted by the article list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ArticleStatus>,
    pub book_id: Option<String>,
    pub tag: Option<String>,
}

impl ArticleQuery {
    #[must_use]
    pub fn query_pairs(&self) -> QueryPairs {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("status", self.status.map(|v| v.to_string())),
            ("bookId", self.book_id.clone()),
            ("tag", self.tag.clone()),
        ]
    }
}
