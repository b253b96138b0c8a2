use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{catalog::MovieCatalog, providers::TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let catalog = MovieCatalog::load(&config.movies_path, &config.similarity_path).with_context(
        || {
            format!(
                "Failed to load catalog from {} and {}",
                config.movies_path, config.similarity_path
            )
        },
    )?;

    tracing::info!(movies = catalog.len(), "Movie catalog loaded");

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        provider: Arc::new(provider),
        default_recommendations: config.default_recommendations,
        max_recommendations: config.max_recommendations,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
