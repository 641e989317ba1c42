//! Unit of work: one transaction plus an identity map per entity.
//!
//! Reads go through the identity map; set-based writes execute entirely in
//! the storage engine and leave the map untouched. A row cached before a
//! bulk write therefore keeps its pre-write values until [`Session::clear`]
//! invalidates the map and a fresh find re-reads the database.

use crate::entity::{Member, Team};
use crate::error::AppError;
use crate::sql::{self, bind_all, bind_all_as, Assignment, MemberFilter};
use crate::store::Tables;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

pub struct Session {
    tx: Transaction<'static, Postgres>,
    tables: Tables,
    members: HashMap<i64, Member>,
    teams: HashMap<i64, Team>,
}

impl Session {
    pub async fn begin(pool: &PgPool, tables: Tables) -> Result<Self, AppError> {
        Ok(Session {
            tx: pool.begin().await?,
            tables,
            members: HashMap::new(),
            teams: HashMap::new(),
        })
    }

    pub async fn insert_team(&mut self, name: &str) -> Result<Team, AppError> {
        let q = sql::insert_team(&self.tables, name);
        let team: Team = bind_all_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_one(&mut *self.tx)
            .await?;
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    pub async fn insert_member(
        &mut self,
        username: &str,
        age: i32,
        team_id: Option<i64>,
    ) -> Result<Member, AppError> {
        let q = sql::insert_member(&self.tables, username, age, team_id);
        let member: Member = bind_all_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_one(&mut *self.tx)
            .await?;
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    /// Consults the identity map first; hits the database only on a miss
    /// and caches the result. A missing row is `Ok(None)`.
    pub async fn find_member(&mut self, id: i64) -> Result<Option<Member>, AppError> {
        if let Some(member) = self.members.get(&id) {
            return Ok(Some(member.clone()));
        }
        let q = sql::member_by_id(&self.tables, id);
        let row: Option<Member> = bind_all_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_optional(&mut *self.tx)
            .await?;
        if let Some(ref member) = row {
            self.members.insert(member.id, member.clone());
        }
        Ok(row)
    }

    pub async fn find_team(&mut self, id: i64) -> Result<Option<Team>, AppError> {
        if let Some(team) = self.teams.get(&id) {
            return Ok(Some(team.clone()));
        }
        let q = sql::team_by_id(&self.tables, id);
        let row: Option<Team> = bind_all_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_optional(&mut *self.tx)
            .await?;
        if let Some(ref team) = row {
            self.teams.insert(team.id, team.clone());
        }
        Ok(row)
    }

    /// Always queries; rows found refresh the identity map.
    pub async fn members_by_username(&mut self, username: &str) -> Result<Vec<Member>, AppError> {
        let q = sql::members_by_username(&self.tables, username);
        let rows: Vec<Member> = bind_all_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_all(&mut *self.tx)
            .await?;
        for member in &rows {
            self.members.insert(member.id, member.clone());
        }
        Ok(rows)
    }

    /// Set-based update of every member matching the filter, in a single
    /// statement. Returns the affected-row count. Bypasses the identity
    /// map: already-cached rows keep their old values until [`clear`].
    ///
    /// [`clear`]: Session::clear
    pub async fn update_members_where(
        &mut self,
        filter: &MemberFilter,
        assignments: &[Assignment],
    ) -> Result<u64, AppError> {
        if assignments.is_empty() {
            return Ok(0);
        }
        let q = sql::bulk_update(&self.tables, filter, assignments);
        tracing::debug!(sql = %q.sql, params = ?q.params, "bulk update");
        let done = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&mut *self.tx)
            .await?;
        Ok(done.rows_affected())
    }

    /// Set-based delete of every member matching the filter. Same identity
    /// map caveat as [`Session::update_members_where`].
    pub async fn delete_members_where(&mut self, filter: &MemberFilter) -> Result<u64, AppError> {
        let q = sql::bulk_delete(&self.tables, filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "bulk delete");
        let done = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&mut *self.tx)
            .await?;
        Ok(done.rows_affected())
    }

    /// Drops every cached row. Finds issued afterwards re-read the
    /// database, picking up the effects of set-based writes.
    pub fn clear(&mut self) {
        self.members.clear();
        self.teams.clear();
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
