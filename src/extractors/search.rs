//! Extract the member search condition and page request from query
//! parameters.

use crate::dto::MemberSearchCondition;
use crate::error::AppError;
use crate::paging::PageRequest;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Extractor for the member search endpoints: the four optional condition
/// fields plus `page`, `size`, and `sort`. Malformed numerics reject with a
/// client error.
#[derive(Clone, Debug)]
pub struct SearchParams {
    pub condition: MemberSearchCondition,
    pub page: PageRequest,
}

#[async_trait]
impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(SearchParams {
            condition: MemberSearchCondition::from_params(&params)?,
            page: PageRequest::from_params(&params)?,
        })
    }
}
