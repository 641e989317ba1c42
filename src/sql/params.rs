//! Typed bind arguments for PostgreSQL queries.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// A value bound to a `$n` placeholder. The variants cover every column
/// type the builders parameterize.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Int(i32),
    BigInt(i64),
    /// Nullable bigint, for the member's optional team reference.
    OptBigInt(Option<i64>),
}

pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &'q [Arg],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            Arg::Text(s) => query.bind(s.as_str()),
            Arg::Int(n) => query.bind(*n),
            Arg::BigInt(n) => query.bind(*n),
            Arg::OptBigInt(n) => query.bind(*n),
        };
    }
    query
}

pub fn bind_all_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: &'q [Arg],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg {
            Arg::Text(s) => query.bind(s.as_str()),
            Arg::Int(n) => query.bind(*n),
            Arg::BigInt(n) => query.bind(*n),
            Arg::OptBigInt(n) => query.bind(*n),
        };
    }
    query
}
