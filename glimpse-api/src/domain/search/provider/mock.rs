//! Mock image provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::search::traits::{ImageProvider, Result, SearchError};
use crate::domain::search::types::{ImageResult, ImageUrls};

/// Mock provider returning configured results, or a forced failure.
#[derive(Clone, Default)]
pub struct MockImageProvider {
    results: Arc<RwLock<Vec<ImageResult>>>,
    failure: Arc<RwLock<Option<String>>>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the results returned by every search.
    pub fn with_results(self, results: Vec<ImageResult>) -> Self {
        *self.results.write().unwrap() = results;
        self
    }

    /// Make every search fail with a provider error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Number of provider calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Build a minimal image descriptor for test fixtures.
    pub fn image(id: &str) -> ImageResult {
        ImageResult {
            id: id.to_string(),
            urls: ImageUrls {
                small: format!("https://images.example.com/{id}?w=400"),
                regular: None,
                thumb: None,
            },
            alt_description: None,
        }
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn search_images(&self, _term: &str, per_page: u8) -> Result<Vec<ImageResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failure.read().unwrap().as_ref() {
            return Err(SearchError::Provider(message.clone()));
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .iter()
            .take(per_page as usize)
            .cloned()
            .collect())
    }
}
