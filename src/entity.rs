//! Persistent rows: team and member. A member references at most one team.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// `team_id` is a nullable foreign key: a member may be teamless.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
