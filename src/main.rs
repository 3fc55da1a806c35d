use diesel_migrations::MigrationHarness;
use pizzeria_api::handlers::app;
use pizzeria_api::{AppConfig, MIGRATIONS};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    let conn = &mut config.connect()?;
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    let listener = tokio::net::TcpListener::bind("0.0.0.0:5555").await?;
    info!("Pizzeria API listening on {}", listener.local_addr()?);

    axum::serve(listener, app(config)).await?;

    Ok(())
}
