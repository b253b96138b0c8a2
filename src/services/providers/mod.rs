/// Movie metadata provider abstraction
///
/// Recommendation cards are enriched with poster art, synopsis, rating, and
/// trailer links fetched from an external metadata API. The trait keeps the
/// HTTP specifics of a given provider out of ranking and routing code.
use crate::{
    error::{AppError, AppResult},
    models::MovieMetadata,
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch full metadata for a single movie id
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieMetadata>;

    /// Fetch metadata for multiple movies in parallel
    ///
    /// Default implementation spawns one task per id. Results come back in
    /// the same order as `movie_ids`, one entry per id, and failures stay
    /// per-entry: a single bad lookup never sinks the whole batch, callers
    /// decide how to degrade.
    async fn fetch_details_batch(&self, movie_ids: Vec<u64>) -> Vec<AppResult<MovieMetadata>> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for movie_id in movie_ids {
            let provider = self.clone_for_task();
            let task = tokio::spawn(async move { provider.fetch_details(movie_id).await });
            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    results.push(Err(AppError::Internal(e.to_string())));
                }
            }
        }

        results
    }

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn MetadataProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
