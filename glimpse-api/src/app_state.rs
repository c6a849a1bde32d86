use std::sync::Arc;

use sqlx::PgPool;
use url::Url;

use crate::{
    config::Settings,
    domain::search::{
        provider::UnsplashImageProvider, store::PgSearchRecordStore, ImageSearchService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub app_url: Url,
    pub db_pool: Arc<PgPool>,
    pub search: Arc<ImageSearchService<UnsplashImageProvider, PgSearchRecordStore>>,
}

impl AppState {
    pub fn new(db_pool: PgPool, settings: &Settings) -> Self {
        let client = match &settings.unsplash.base_url {
            Some(base_url) => {
                unsplash::UnsplashClient::with_base_url(&settings.unsplash.access_key, base_url)
            }
            None => unsplash::UnsplashClient::new(&settings.unsplash.access_key),
        };

        let provider = UnsplashImageProvider::new(client);
        let store = PgSearchRecordStore::new(db_pool.clone());
        let search = Arc::new(ImageSearchService::with_defaults(provider, store));

        let app_url = Url::parse(&settings.application.app_url).expect("Invalid app URL");

        Self {
            app_url,
            db_pool: Arc::new(db_pool),
            search,
        }
    }
}
