//! Server binary: reads settings, prepares the schema (or reseeds), mounts the routes.

use news_api::{app_with_layers, ensure_schema, seed, AppState, PgStore, SeedData, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("news_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    match &settings.seed_dir {
        Some(dir) => {
            let data = SeedData::load_dir(dir).await?;
            seed(&pool, &data).await?;
        }
        None => {
            let mut conn = pool.acquire().await?;
            ensure_schema(&mut conn).await?;
        }
    }

    let state = AppState::new(PgStore::new(pool));
    let app = app_with_layers(state, &settings);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
