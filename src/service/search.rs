//! Search execution against PostgreSQL: the member/team join query, the
//! count query, and the two paging strategies layered on top.

use crate::dto::MemberTeamDto;
use crate::error::AppError;
use crate::paging::{infer_total, Page, PageRequest, Sort};
use crate::sql::{self, bind_all_as, MemberFilter};
use crate::store::Tables;
use sqlx::PgPool;

pub struct SearchService;

impl SearchService {
    /// Unpaged search: left join member onto team, apply the filter,
    /// project each row into a DTO. Teamless members come back with NULL
    /// team columns, not dropped.
    pub async fn search(
        pool: &PgPool,
        tables: &Tables,
        filter: &MemberFilter,
        sort: Option<Sort>,
    ) -> Result<Vec<MemberTeamDto>, AppError> {
        let q = sql::search(tables, filter, sort);
        tracing::debug!(sql = %q.sql, params = ?q.params, "search");
        let rows = bind_all_as(sqlx::query_as::<_, MemberTeamDto>(&q.sql), &q.params)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Total matching rows across all pages.
    pub async fn count(
        pool: &PgPool,
        tables: &Tables,
        filter: &MemberFilter,
    ) -> Result<u64, AppError> {
        let q = sql::count(tables, filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "count");
        let (total,): (i64,) = bind_all_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_one(pool)
            .await?;
        Ok(total as u64)
    }

    /// Simple strategy: always two queries, the content slice plus an
    /// unconditional count.
    pub async fn search_page_simple(
        pool: &PgPool,
        tables: &Tables,
        filter: &MemberFilter,
        req: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        let content = Self::slice(pool, tables, filter, req).await?;
        let total = Self::count(pool, tables, filter).await?;
        Ok(Page::new(content, req.page, req.size, total))
    }

    /// Optimized strategy: when the first page comes back under-full the
    /// whole result set is in view and the total is the slice length; any
    /// other shape falls back to the count query.
    pub async fn search_page_optimized(
        pool: &PgPool,
        tables: &Tables,
        filter: &MemberFilter,
        req: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        let content = Self::slice(pool, tables, filter, req).await?;
        let total = match infer_total(req.page, req.size, content.len()) {
            Some(total) => total,
            None => Self::count(pool, tables, filter).await?,
        };
        Ok(Page::new(content, req.page, req.size, total))
    }

    async fn slice(
        pool: &PgPool,
        tables: &Tables,
        filter: &MemberFilter,
        req: &PageRequest,
    ) -> Result<Vec<MemberTeamDto>, AppError> {
        if req.size == 0 {
            return Err(AppError::BadRequest("size must be at least 1".into()));
        }
        let q = sql::search_page(tables, filter, req.sort, req.size, req.offset());
        tracing::debug!(sql = %q.sql, params = ?q.params, "search page");
        let rows = bind_all_as(sqlx::query_as::<_, MemberTeamDto>(&q.sql), &q.params)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
