//! Offset/limit pagination for list endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::names::normalize_filter;

/// Query parameters accepted by list endpoints (`?page=&limit=&name=`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, message = "page must be greater than 0"))]
    pub page: i64,
    #[validate(range(min = 1, message = "limit must be greater than 0"))]
    pub limit: i64,
    /// Case-insensitive substring filter on `name`.
    pub name: Option<String>,
}

impl ListQuery {
    /// Validate bounds and normalize the name filter.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(Self {
            name: normalize_filter(self.name.as_deref()),
            ..self
        })
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination envelope fields shared by every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(query: &ListQuery, total: i64) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            total,
            total_pages: total_pages(total, query.limit),
        }
    }
}

/// `ceil(total / limit)`, or `0` when there are no rows.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
