//! Member search endpoints: v1 unpaged, v2 simple paging, v3 optimized
//! paging.
//!
//! v1 builds its filter with the accumulating builder, v2/v3 with the
//! independent factories; the two construction routes are interchangeable.

use crate::dto::MemberTeamDto;
use crate::error::AppError;
use crate::extractors::SearchParams;
use crate::paging::Page;
use crate::service::SearchService;
use crate::sql::MemberFilter;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /v1/members: the full matching list, unpaged.
pub async fn search(
    State(state): State<AppState>,
    params: SearchParams,
) -> Result<Json<Vec<MemberTeamDto>>, AppError> {
    let filter = MemberFilter::from_builder(&params.condition);
    let rows = SearchService::search(&state.pool, &state.tables, &filter, None).await?;
    Ok(Json(rows))
}

/// GET /v2/members: paged, total always computed by a count query.
pub async fn search_page_simple(
    State(state): State<AppState>,
    params: SearchParams,
) -> Result<Json<Page<MemberTeamDto>>, AppError> {
    let filter = MemberFilter::from_factories(&params.condition);
    let page =
        SearchService::search_page_simple(&state.pool, &state.tables, &filter, &params.page)
            .await?;
    Ok(Json(page))
}

/// GET /v3/members: paged, count query skipped when the first page is
/// under-full.
pub async fn search_page_optimized(
    State(state): State<AppState>,
    params: SearchParams,
) -> Result<Json<Page<MemberTeamDto>>, AppError> {
    let filter = MemberFilter::from_factories(&params.condition);
    let page =
        SearchService::search_page_optimized(&state.pool, &state.tables, &filter, &params.page)
            .await?;
    Ok(Json(page))
}
