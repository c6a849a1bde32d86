//! Unsplash-backed image provider.

use async_trait::async_trait;

use ::unsplash::{Photo, UnsplashClient};

use crate::domain::search::traits::{ImageProvider, Result};
use crate::domain::search::types::{ImageResult, ImageUrls};

pub struct UnsplashImageProvider {
    client: UnsplashClient,
}

impl UnsplashImageProvider {
    pub fn new(client: UnsplashClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageProvider for UnsplashImageProvider {
    async fn search_images(&self, term: &str, per_page: u8) -> Result<Vec<ImageResult>> {
        let photos = self.client.search_photos(term, per_page).await?;

        Ok(photos.into_iter().map(ImageResult::from).collect())
    }
}

impl From<Photo> for ImageResult {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            urls: ImageUrls {
                small: photo.urls.small,
                regular: photo.urls.regular,
                thumb: photo.urls.thumb,
            },
            alt_description: photo.alt_description,
        }
    }
}
