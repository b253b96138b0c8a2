use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use cinematch_api::{
    error::{AppError, AppResult},
    models::{Movie, MovieMetadata},
    routes::{create_router, AppState},
    services::{catalog::MovieCatalog, providers::MetadataProvider},
};

/// Provider stub serving canned metadata; id 500 always fails, id 400 has no poster
#[derive(Clone)]
struct StubProvider;

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieMetadata> {
        if movie_id == 500 {
            return Err(AppError::ExternalApi("stub failure".to_string()));
        }
        Ok(MovieMetadata {
            movie_id,
            title: format!("Movie {}", movie_id),
            overview: Some("A test overview".to_string()),
            release_date: Some("2010-07-16".to_string()),
            rating: Some(8.4),
            runtime: Some(148),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            poster_url: (movie_id != 400)
                .then(|| format!("https://image.test/w500/{}.jpg", movie_id)),
            trailer_url: Some("https://www.youtube.com/watch?v=stub".to_string()),
        })
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn test_catalog() -> MovieCatalog {
    let movies = vec![
        Movie {
            movie_id: 100,
            title: "Inception".to_string(),
        },
        Movie {
            movie_id: 200,
            title: "The Matrix".to_string(),
        },
        Movie {
            movie_id: 300,
            title: "Interstellar".to_string(),
        },
        Movie {
            movie_id: 400,
            title: "Heat".to_string(),
        },
        Movie {
            movie_id: 500,
            title: "Broken Poster".to_string(),
        },
    ];
    let similarity = vec![
        vec![1.0, 0.9, 0.8, 0.1, 0.5],
        vec![0.9, 1.0, 0.7, 0.2, 0.4],
        vec![0.8, 0.7, 1.0, 0.3, 0.2],
        vec![0.1, 0.2, 0.3, 1.0, 0.6],
        vec![0.5, 0.4, 0.2, 0.6, 1.0],
    ];
    MovieCatalog::from_parts(movies, similarity).unwrap()
}

fn create_test_server() -> TestServer {
    let state = AppState {
        catalog: Arc::new(test_catalog()),
        provider: Arc::new(StubProvider),
        default_recommendations: 3,
        max_recommendations: 4,
    };
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_index_page() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Movie Recommendations"));
}

#[tokio::test]
async fn test_list_movies() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();

    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 5);
    assert_eq!(movies[0]["title"], "Inception");
    assert_eq!(movies[0]["movie_id"], 100);
}

#[tokio::test]
async fn test_list_movies_filtered() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies").add_query_param("q", "matrix").await;
    response.assert_status_ok();

    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "The Matrix");
}

#[tokio::test]
async fn test_recommendations_ranked_and_self_excluded() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Inception", "limit": 3 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["query"], "Inception");

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);

    // Descending by similarity, query movie absent
    assert_eq!(recs[0]["title"], "The Matrix");
    assert_eq!(recs[1]["title"], "Interstellar");
    assert_eq!(recs[2]["title"], "Broken Poster");
    assert!(recs.iter().all(|r| r["title"] != "Inception"));

    let top_score = recs[0]["score"].as_f64().unwrap();
    assert!((top_score - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn test_recommendations_failed_fetch_degrades_to_placeholder() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Inception", "limit": 3, "include_details": true }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let recs = body["recommendations"].as_array().unwrap();

    // Movie 200 resolved normally
    assert_eq!(
        recs[0]["poster_url"],
        "https://image.test/w500/200.jpg"
    );
    assert!(recs[0].get("details").is_some());

    // Movie 500 failed upstream: placeholder, no details, response still 200
    assert_eq!(recs[2]["movie_id"], 500);
    assert_eq!(
        recs[2]["poster_url"],
        "https://via.placeholder.com/500x750?text=No+Poster+Available"
    );
    assert!(recs[2].get("details").is_none());
}

#[tokio::test]
async fn test_recommendations_missing_poster_uses_placeholder() {
    let server = create_test_server();

    // Interstellar's row ranks Heat fourth, and Heat has no poster in the stub
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Interstellar", "limit": 4 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let heat = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["movie_id"] == 400)
        .expect("Heat should be recommended");

    assert_eq!(
        heat["poster_url"],
        "https://via.placeholder.com/500x750?text=No+Poster+Available"
    );
}

#[tokio::test]
async fn test_recommendations_default_limit() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Heat" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_recommendations_limit_clamped_to_max() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Heat", "limit": 50 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_recommendations_details_omitted_by_default() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Heat", "limit": 1 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let recs = body["recommendations"].as_array().unwrap();
    assert!(recs[0].get("details").is_none());
    // Posters are still resolved even without inline details
    assert!(recs[0]["poster_url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_recommendations_title_case_insensitive() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "the matrix", "limit": 1 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"][0]["title"], "Inception");
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Not In Catalog" }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Not In Catalog"));
}

#[tokio::test]
async fn test_recommendations_empty_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "   " }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_details() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/200").await;
    response.assert_status_ok();

    let details: serde_json::Value = response.json();
    assert_eq!(details["movie_id"], 200);
    assert_eq!(details["overview"], "A test overview");
    assert_eq!(details["genres"][1], "Science Fiction");
}

#[tokio::test]
async fn test_movie_details_unknown_id() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/999").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_movie_details_upstream_failure() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/500").await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_request_id_echoed_on_response() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}
