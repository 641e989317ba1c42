//! Page request/response shapes and the count-eliding total inference.

use crate::error::AppError;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Username,
    Age,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub descending: bool,
}

impl Sort {
    /// Parse `sort=key` or `sort=key,desc` with keys `username|age|id`.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let mut parts = s.split(',');
        let key = match parts.next().unwrap_or("") {
            "username" => SortKey::Username,
            "age" => SortKey::Age,
            "id" => SortKey::Id,
            other => return Err(AppError::BadRequest(format!("invalid sort key: '{}'", other))),
        };
        let descending = match parts.next() {
            None => false,
            Some("desc") => true,
            Some("asc") => false,
            Some(other) => {
                return Err(AppError::BadRequest(format!("invalid sort direction: '{}'", other)))
            }
        };
        Ok(Sort { key, descending })
    }
}

/// Zero-based page index plus page size, with an optional sort.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    /// Parse from query parameters (`page`, `size`, `sort`). Absent keys
    /// take defaults; malformed values and `size=0` are client errors.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let page = parse_u32(params, "page")?.unwrap_or(0);
        let size = parse_u32(params, "size")?.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 {
            return Err(AppError::BadRequest("size must be at least 1".into()));
        }
        let sort = params.get("sort").map(|s| Sort::parse(s)).transpose()?;
        Ok(PageRequest {
            page,
            size: size.min(MAX_PAGE_SIZE),
            sort,
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

fn parse_u32(params: &HashMap<String, String>, key: &str) -> Result<Option<u32>, AppError> {
    match params.get(key) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid {}: '{}'", key, v))),
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Caller guarantees `size > 0` (enforced at request parsing).
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(size));
        Page {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

/// When the slice alone determines the total, returns it; `None` means a
/// count query is required. The inference only holds on the first page: an
/// under-full slice there proves the entire result set is in view, while an
/// under-full page N only proves page N is the last one.
pub fn infer_total(page: u32, size: u32, fetched: usize) -> Option<u64> {
    if page == 0 && (fetched as u64) < u64::from(size) {
        Some(fetched as u64)
    } else {
        None
    }
}
