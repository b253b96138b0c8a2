use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Poster substituted when TMDB has no artwork or a lookup failed
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/500x750?text=No+Poster+Available";

/// One catalog entry: a TMDB movie id plus the display title
///
/// Catalog order is significant: a movie's position in the catalog is its
/// row and column index in the similarity matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: u64,
    pub title: String,
}

/// Enriched metadata for a single movie, resolved via a metadata provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub movie_id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw TMDB response from GET /movie/{id}?append_to_response=videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub videos: Option<TmdbVideoList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoList {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

impl TmdbMovieDetails {
    /// First YouTube-hosted trailer in the video list, if any
    pub fn trailer(&self) -> Option<&TmdbVideo> {
        self.videos
            .as_ref()?
            .results
            .iter()
            .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
    }
}

// ============================================================================
// API request/response types
// ============================================================================

/// Request to rank similar movies for a catalog title
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Embed full metadata inline instead of leaving it to the details endpoint
    #[serde(default)]
    pub include_details: bool,
}

/// One recommendation card
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub movie_id: u64,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<MovieMetadata>,
}

/// Ranked recommendations for a query title
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub generated_at: DateTime<Utc>,
    pub recommendations: Vec<Recommendation>,
}
