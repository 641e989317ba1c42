//! Table DDL and database bootstrap. All tables live in a schema named from
//! `ROSTER_SCHEMA` env (default `roster`).

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Schema name for roster tables. Must be a valid PostgreSQL identifier.
pub fn roster_schema() -> String {
    std::env::var("ROSTER_SCHEMA").unwrap_or_else(|_| "roster".into())
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified table names, resolved once and passed to the SQL
/// builders.
#[derive(Clone, Debug)]
pub struct Tables {
    pub member: String,
    pub team: String,
}

impl Tables {
    pub fn new(schema: &str) -> Self {
        Tables {
            member: format!("{}.{}", quoted(schema), quoted("member")),
            team: format!("{}.{}", quoted(schema), quoted("team")),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&roster_schema())
    }
}

/// Create the schema and the team/member tables if absent. Idempotent; run
/// before serving.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let tables = Tables::new(schema);
    let team_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        tables.team
    );
    sqlx::query(&team_ddl).execute(pool).await?;

    let member_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL,
            age INT NOT NULL,
            team_id BIGINT REFERENCES {} (id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        tables.member, tables.team
    );
    sqlx::query(&member_ddl).execute(pool).await?;

    let index_ddl = format!(
        "CREATE INDEX IF NOT EXISTS member_team_id_idx ON {} (team_id)",
        tables.member
    );
    sqlx::query(&index_ddl).execute(pool).await?;

    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects
/// to the default `postgres` database to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_db_name(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

/// Split `database_url` into (url of the admin `postgres` database, db name).
fn split_db_name(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
