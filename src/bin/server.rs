//! Server binary: env config, database bootstrap, route assembly.

use axum::Router;
use roster::{
    common_routes_with_ready, ensure_database_exists, ensure_tables, member_routes,
    store::roster_schema, AppState, Tables,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("roster=info".parse()?))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/roster".into());
    ensure_database_exists(&database_url).await?;
    let max_connections = std::env::var("ROSTER_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    let schema = roster_schema();
    ensure_tables(&pool, &schema).await?;
    let state = AppState {
        pool,
        tables: Tables::new(&schema),
    };

    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(member_routes(state))
        .layer(TraceLayer::new_for_http());

    let addr = std::env::var("ROSTER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
