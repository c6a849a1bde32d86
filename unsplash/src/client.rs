use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{Photo, SearchPhotosResponse};

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self::with_base_url(access_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different host, e.g. a stub server.
    pub fn with_base_url(access_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: impl AsRef<str>,
        query: &[(&str, String)],
    ) -> Result<T, UnsplashFetchError> {
        let resp = self
            .http
            .get(url.as_ref())
            .query(query)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(|e| UnsplashFetchError::ResponseError(e.to_string()))?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(UnsplashFetchError::Unauthorized);
        }
        if !resp.status().is_success() {
            return Err(UnsplashFetchError::ResponseError(format!(
                "unexpected status {}",
                resp.status()
            )));
        }

        let resp_data = resp.json::<T>().await.map_err(|e| {
            UnsplashFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        Ok(resp_data)
    }

    /// Search photos matching `query`, requesting at most `per_page` results.
    /// Results come back in the provider's relevance order.
    #[tracing::instrument(skip(self))]
    pub async fn search_photos(
        &self,
        query: &str,
        per_page: u8,
    ) -> Result<Vec<Photo>, UnsplashFetchError> {
        let url = format!("{}/search/photos", self.base_url);
        let response: SearchPhotosResponse = self
            .fetch(
                url,
                &[
                    ("query", query.to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;

        Ok(response.results)
    }
}

#[derive(Error, Debug)]
pub enum UnsplashFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}
