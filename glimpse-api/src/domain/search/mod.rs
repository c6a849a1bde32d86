//! Image search domain: provider access, the durable search-record log, and
//! the service orchestrating them.

pub mod provider;
mod service;
pub mod store;
mod traits;
mod types;

pub use service::{ImageSearchService, SearchConfig};
pub use traits::{ImageProvider, SearchError, SearchRecordStore};
pub use types::{ImageResult, ImageUrls, SearchRecord, TermCount, TimeWindow};
