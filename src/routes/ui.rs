use axum::response::Html;

/// Serves the embedded single-page UI
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
