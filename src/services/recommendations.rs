use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{Recommendation, RecommendationRequest, RecommendationResponse, PLACEHOLDER_POSTER},
    services::{catalog::MovieCatalog, providers::MetadataProvider},
};

/// Generates recommendations for a query title
///
/// Ranks the catalog against the query, then enriches each winner with
/// metadata from the provider. A failed lookup degrades that single card to
/// the placeholder poster instead of failing the whole response.
pub async fn recommend_movies(
    catalog: Arc<MovieCatalog>,
    provider: Arc<dyn MetadataProvider>,
    request: RecommendationRequest,
    default_limit: usize,
    max_limit: usize,
) -> AppResult<RecommendationResponse> {
    let query = request.title.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Movie title cannot be empty".to_string(),
        ));
    }

    let limit = request.limit.unwrap_or(default_limit).clamp(1, max_limit);

    let ranked = catalog.recommend(query, limit)?;
    let movie_ids: Vec<u64> = ranked.iter().map(|s| s.movie.movie_id).collect();

    let metadata = provider.fetch_details_batch(movie_ids).await;

    let mut recommendations = Vec::with_capacity(ranked.len());
    for (scored, fetched) in ranked.into_iter().zip(metadata) {
        let recommendation = match fetched {
            Ok(details) => Recommendation {
                movie_id: scored.movie.movie_id,
                title: scored.movie.title,
                score: scored.score,
                poster_url: details
                    .poster_url
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
                details: request.include_details.then_some(details),
            },
            Err(e) => {
                tracing::warn!(
                    movie_id = scored.movie.movie_id,
                    error = %e,
                    "Metadata fetch failed, serving placeholder"
                );
                Recommendation {
                    movie_id: scored.movie.movie_id,
                    title: scored.movie.title,
                    score: scored.score,
                    poster_url: PLACEHOLDER_POSTER.to_string(),
                    details: None,
                }
            }
        };
        recommendations.push(recommendation);
    }

    tracing::info!(
        query = %query,
        results = recommendations.len(),
        provider = provider.name(),
        "Recommendations generated"
    );

    Ok(RecommendationResponse {
        query: query.to_string(),
        generated_at: Utc::now(),
        recommendations,
    })
}
