//! Pagination wrappers shared by list endpoints

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Paginated list returned by the articles and books endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

impl<T> PaginatedResponse<T> {
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page >= self.pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl_wire_enum_conversions!(SortOrder {
    Asc => "asc",
    Desc => "desc",
});
