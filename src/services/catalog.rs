//! Movie catalog backed by a precomputed similarity matrix.
//!
//! Both artifacts are built offline: the catalog lists `{movie_id, title}`
//! records in matrix order, and the matrix holds pairwise content-similarity
//! scores, one row per catalog entry. This module loads them, validates
//! their shape, and answers the ranking query.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// A catalog movie ranked against a query title
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie: Movie,
    pub score: f32,
}

/// In-memory catalog plus the similarity matrix over it
#[derive(Debug)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    similarity: Vec<Vec<f32>>,
    title_index: HashMap<String, usize>,
}

impl MovieCatalog {
    /// Loads the catalog and similarity matrix from their JSON artifacts
    pub fn load(
        movies_path: impl AsRef<Path>,
        similarity_path: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let movies_path = movies_path.as_ref();
        let similarity_path = similarity_path.as_ref();

        let raw = fs::read(movies_path).map_err(|e| {
            AppError::Dataset(format!("Failed to read {}: {}", movies_path.display(), e))
        })?;
        let movies: Vec<Movie> = serde_json::from_slice(&raw)
            .map_err(|e| AppError::Dataset(format!("Failed to parse movie catalog: {}", e)))?;

        let raw = fs::read(similarity_path).map_err(|e| {
            AppError::Dataset(format!(
                "Failed to read {}: {}",
                similarity_path.display(),
                e
            ))
        })?;
        let similarity: Vec<Vec<f32>> = serde_json::from_slice(&raw)
            .map_err(|e| AppError::Dataset(format!("Failed to parse similarity matrix: {}", e)))?;

        Self::from_parts(movies, similarity)
    }

    /// Builds a catalog from in-memory parts, validating the matrix shape
    pub fn from_parts(movies: Vec<Movie>, similarity: Vec<Vec<f32>>) -> AppResult<Self> {
        if movies.is_empty() {
            return Err(AppError::Dataset("Movie catalog is empty".to_string()));
        }

        if similarity.len() != movies.len() {
            return Err(AppError::Dataset(format!(
                "Similarity matrix has {} rows for {} movies",
                similarity.len(),
                movies.len()
            )));
        }

        for (i, row) in similarity.iter().enumerate() {
            if row.len() != movies.len() {
                return Err(AppError::Dataset(format!(
                    "Similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    movies.len()
                )));
            }
        }

        let mut title_index = HashMap::with_capacity(movies.len());
        for (i, movie) in movies.iter().enumerate() {
            let key = movie.title.to_lowercase();
            if title_index.contains_key(&key) {
                tracing::warn!(
                    title = %movie.title,
                    "Duplicate title in catalog, keeping first entry"
                );
            } else {
                title_index.insert(key, i);
            }
        }

        Ok(Self {
            movies,
            similarity,
            title_index,
        })
    }

    /// Ranks every other catalog movie against `title` and returns the top `k`
    ///
    /// The query movie itself is excluded by index, so a tie at score 1.0
    /// cannot push it into the results. NaN scores sort as equal.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<ScoredMovie>> {
        let index = self
            .title_index
            .get(&title.to_lowercase())
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Movie not found in catalog: {}", title)))?;

        let row = &self.similarity[index];
        let mut scored: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| ScoredMovie {
                movie: self.movies[i].clone(),
                score,
            })
            .collect())
    }

    /// All catalog movies in matrix order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Looks up a catalog movie by TMDB id
    pub fn get(&self, movie_id: u64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.movie_id == movie_id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
