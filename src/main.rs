mod app;
mod auth;
mod cart;
mod catalog;
mod config;
mod error;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "bakeshop=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    // `bakeshop seed` runs the one-shot catalog seeder and exits
    if std::env::args().nth(1).as_deref() == Some("seed") {
        catalog::seed::run(&app_state.db).await?;
        tracing::info!("catalog seeding complete");
        return Ok(());
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
