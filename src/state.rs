//! Shared application state for all routes.

use crate::store::Tables;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Schema-qualified table names, resolved once at startup.
    pub tables: Tables,
}
