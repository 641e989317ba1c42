//! Builds parameterized SELECT, UPDATE, DELETE statements for the member
//! and team tables. The member list query left-joins team so teamless
//! members are retained with NULL team columns.

use crate::paging::{Sort, SortKey};
use crate::sql::filter::{MemberFilter, Predicate};
use crate::sql::params::Arg;
use crate::store::Tables;

/// Columns of the member/team join, aliased to match `MemberTeamDto`.
const DTO_COLUMNS: &str =
    "m.id AS member_id, m.username, m.age, t.id AS team_id, t.name AS team_name";

const MEMBER_COLUMNS: &str = "id, username, age, team_id, created_at";
const TEAM_COLUMNS: &str = "id, name, created_at";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Arg>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Arg) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Where a filter is rendered: against the aliased member/team join, or
/// against the bare member table (bulk statements, where the team name
/// constraint becomes a subquery).
enum FilterScope<'a> {
    Joined,
    Bare { team: &'a str },
}

fn push_where(q: &mut QueryBuf, filter: &MemberFilter, scope: &FilterScope<'_>) {
    let mut parts = Vec::new();
    for p in filter.predicates() {
        let frag = match (p, scope) {
            (Predicate::UsernameEq(u), FilterScope::Joined) => {
                format!("m.username = ${}", q.push_param(Arg::Text(u.clone())))
            }
            (Predicate::UsernameEq(u), FilterScope::Bare { .. }) => {
                format!("username = ${}", q.push_param(Arg::Text(u.clone())))
            }
            (Predicate::TeamNameEq(t), FilterScope::Joined) => {
                format!("t.name = ${}", q.push_param(Arg::Text(t.clone())))
            }
            (Predicate::TeamNameEq(t), FilterScope::Bare { team }) => format!(
                "team_id IN (SELECT id FROM {} WHERE name = ${})",
                team,
                q.push_param(Arg::Text(t.clone()))
            ),
            (Predicate::AgeGoe(b), FilterScope::Joined) => {
                format!("m.age >= ${}", q.push_param(Arg::Int(*b)))
            }
            (Predicate::AgeGoe(b), FilterScope::Bare { .. }) => {
                format!("age >= ${}", q.push_param(Arg::Int(*b)))
            }
            (Predicate::AgeLoe(b), FilterScope::Joined) => {
                format!("m.age <= ${}", q.push_param(Arg::Int(*b)))
            }
            (Predicate::AgeLoe(b), FilterScope::Bare { .. }) => {
                format!("age <= ${}", q.push_param(Arg::Int(*b)))
            }
        };
        parts.push(frag);
    }
    if !parts.is_empty() {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(&parts.join(" AND "));
    }
}

/// ORDER BY for the join query. `m.id` is always the final key so pages are
/// stable under equal sort values.
fn order_clause(sort: Option<Sort>) -> String {
    match sort {
        None => " ORDER BY m.id".into(),
        Some(s) => {
            let dir = if s.descending { " DESC" } else { "" };
            match s.key {
                SortKey::Id => format!(" ORDER BY m.id{}", dir),
                SortKey::Username => format!(" ORDER BY m.username{}, m.id", dir),
                SortKey::Age => format!(" ORDER BY m.age{}, m.id", dir),
            }
        }
    }
}

fn join_from(tables: &Tables) -> String {
    format!(
        "FROM {} m LEFT JOIN {} t ON t.id = m.team_id",
        tables.member, tables.team
    )
}

/// Unpaged search: join, filter, projection into DTO columns.
pub fn search(tables: &Tables, filter: &MemberFilter, sort: Option<Sort>) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} {}", DTO_COLUMNS, join_from(tables));
    push_where(&mut q, filter, &FilterScope::Joined);
    q.sql.push_str(&order_clause(sort));
    q
}

/// One page of the search: same query with LIMIT/OFFSET applied.
pub fn search_page(
    tables: &Tables,
    filter: &MemberFilter,
    sort: Option<Sort>,
    limit: u32,
    offset: u64,
) -> QueryBuf {
    let mut q = search(tables, filter, sort);
    q.sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
    q
}

/// Total count of matching rows, same join and filter, no limit.
pub fn count(tables: &Tables, filter: &MemberFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) {}", join_from(tables));
    push_where(&mut q, filter, &FilterScope::Joined);
    q
}

/// One column assignment of a set-based update.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// `username = <literal>`
    Username(String),
    /// `age = <literal>`
    Age(i32),
    /// `age = age + <delta>`, evaluated per row in the storage engine.
    AgeAdd(i32),
}

/// Set-based UPDATE of every member matching the filter. Affected-row count
/// comes from the statement result.
pub fn bulk_update(tables: &Tables, filter: &MemberFilter, assignments: &[Assignment]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = assignments
        .iter()
        .map(|a| match a {
            Assignment::Username(u) => {
                format!("username = ${}", q.push_param(Arg::Text(u.clone())))
            }
            Assignment::Age(n) => format!("age = ${}", q.push_param(Arg::Int(*n))),
            Assignment::AgeAdd(d) => format!("age = age + ${}", q.push_param(Arg::Int(*d))),
        })
        .collect();
    q.sql = format!("UPDATE {} SET {}", tables.member, sets.join(", "));
    push_where(&mut q, filter, &FilterScope::Bare { team: &tables.team });
    q
}

/// Set-based DELETE of every member matching the filter.
pub fn bulk_delete(tables: &Tables, filter: &MemberFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", tables.member);
    push_where(&mut q, filter, &FilterScope::Bare { team: &tables.team });
    q
}

pub fn member_by_id(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Arg::BigInt(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE id = ${}",
        MEMBER_COLUMNS, tables.member, n
    );
    q
}

pub fn team_by_id(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Arg::BigInt(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE id = ${}",
        TEAM_COLUMNS, tables.team, n
    );
    q
}

pub fn members_by_username(tables: &Tables, username: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Arg::Text(username.to_string()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE username = ${} ORDER BY id",
        MEMBER_COLUMNS, tables.member, n
    );
    q
}

pub fn insert_member(
    tables: &Tables,
    username: &str,
    age: i32,
    team_id: Option<i64>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(Arg::Text(username.to_string()));
    q.push_param(Arg::Int(age));
    q.push_param(Arg::OptBigInt(team_id));
    q.sql = format!(
        "INSERT INTO {} (username, age, team_id) VALUES ($1, $2, $3) RETURNING {}",
        tables.member, MEMBER_COLUMNS
    );
    q
}

pub fn insert_team(tables: &Tables, name: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(Arg::Text(name.to_string()));
    q.sql = format!(
        "INSERT INTO {} (name) VALUES ($1) RETURNING {}",
        tables.team, TEAM_COLUMNS
    );
    q
}
