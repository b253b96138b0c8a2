use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        title = %request.title,
        limit = ?request.limit,
        include_details = request.include_details,
        "Processing recommendation request"
    );

    let response = recommendations::recommend_movies(
        state.catalog.clone(),
        state.provider.clone(),
        request,
        state.default_recommendations,
        state.max_recommendations,
    )
    .await?;

    Ok(Json(response))
}
