use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized movie catalog (id + title per entry)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the serialized similarity matrix
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB poster base URL, size segment included
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Recommendations returned when the client does not ask for a count
    #[serde(default = "default_recommendation_count")]
    pub default_recommendations: usize,

    /// Upper bound on the recommendation count a client may request
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
}

fn default_movies_path() -> String {
    "data/movies.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_count() -> usize {
    5
}

fn default_max_recommendations() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
