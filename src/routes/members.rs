//! Member search routes.

use crate::handlers::members::{search, search_page_optimized, search_page_simple};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn member_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/members", get(search))
        .route("/v2/members", get(search_page_simple))
        .route("/v3/members", get(search_page_optimized))
        .with_state(state)
}
