use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieMetadata},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: Option<String>,
}

/// Handler for the catalog listing endpoint
///
/// Returns every catalog title in matrix order, optionally filtered by a
/// case-insensitive substring. Feeds the UI dropdown.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Movie>> {
    let movies = state.catalog.movies();

    let filtered = match params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let needle = q.to_lowercase();
            movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        None => movies.to_vec(),
    };

    Json(filtered)
}

/// Handler for the on-demand movie details endpoint
///
/// Serves only ids present in the catalog, so the binary is not an open
/// proxy for the upstream metadata API.
pub async fn details(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieMetadata>> {
    if state.catalog.get(movie_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Movie id not in catalog: {}",
            movie_id
        )));
    }

    let details = state.provider.fetch_details(movie_id).await?;
    Ok(Json(details))
}
