/// TMDB metadata provider
///
/// Fetches movie details from The Movie Database in a single request per
/// movie, with trailers piggybacked via `append_to_response=videos`.
///
/// API Flow:
/// 1. GET /movie/{id}?append_to_response=videos&language=en-US
/// 2. Poster URL = image base + poster_path (absent path stays None; the
///    recommendation layer substitutes the placeholder)
/// 3. Trailer URL = first YouTube video of type "Trailer"
use crate::{
    error::{AppError, AppResult},
    models::{MovieMetadata, TmdbMovieDetails},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, image_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            image_url,
        }
    }

    /// Convert a raw TMDB payload into provider-agnostic metadata
    fn convert_details(&self, details: TmdbMovieDetails) -> MovieMetadata {
        let poster_url = details
            .poster_path
            .as_deref()
            .map(|path| format!("{}{}", self.image_url, path));

        let trailer_url = details
            .trailer()
            .map(|video| format!("https://www.youtube.com/watch?v={}", video.key));

        MovieMetadata {
            movie_id: details.id,
            title: details.title,
            overview: details.overview.filter(|o| !o.is_empty()),
            // TMDB reports unreleased titles with an empty string here
            release_date: details.release_date.filter(|d| !d.is_empty()),
            rating: details.vote_average,
            runtime: details.runtime,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            poster_url,
            trailer_url,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieMetadata> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", "videos"),
                ("language", LANGUAGE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;
        let metadata = self.convert_details(details);

        tracing::info!(
            movie_id = movie_id,
            has_poster = metadata.poster_url.is_some(),
            has_trailer = metadata.trailer_url.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(metadata)
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
