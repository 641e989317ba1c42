//! Transient request/response shapes for member search.

use crate::error::AppError;
use serde::Serialize;
use sqlx::FromRow;
use std::collections::HashMap;

/// Caller-supplied filter request. Every field is optional; `None` means
/// "no constraint on this field". A fully unset condition matches every
/// member. `age_goe > age_loe` is legal and simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Parse from query parameters (`username`, `teamName`, `ageGoe`,
    /// `ageLoe`). Absent keys stay unset; malformed age bounds are a client
    /// error.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        Ok(MemberSearchCondition {
            username: params.get("username").cloned(),
            team_name: params.get("teamName").cloned(),
            age_goe: parse_age(params, "ageGoe")?,
            age_loe: parse_age(params, "ageLoe")?,
        })
    }
}

fn parse_age(params: &HashMap<String, String>, key: &str) -> Result<Option<i32>, AppError> {
    match params.get(key) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid {}: '{}'", key, v))),
    }
}

/// Flat projection of a member joined with its team. Team fields are `None`
/// exactly when the member's team reference was NULL at query time.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}
