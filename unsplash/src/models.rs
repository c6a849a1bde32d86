use serde::{Deserialize, Serialize};

/// A single photo descriptor as returned by the search endpoint.
///
/// Only the fields this crate's consumers rely on are modeled; everything
/// else in the payload is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
}

/// Pre-rendered size variants for a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: String,
    pub thumb: Option<String>,
}

/// Envelope for `GET /search/photos`. Results are ordered by relevance.
#[derive(Debug, Deserialize)]
pub struct SearchPhotosResponse {
    pub total: i64,
    pub total_pages: i64,
    pub results: Vec<Photo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_RESPONSE: &str = r##"
    {
        "total": 133,
        "total_pages": 7,
        "results": [
            {
                "id": "eOLpJytrbsQ",
                "created_at": "2014-11-18T14:35:36-05:00",
                "width": 5245,
                "height": 3497,
                "color": "#60544D",
                "likes": 12,
                "description": "A man drinking a coffee.",
                "alt_description": null,
                "user": { "id": "pXhwzz1JtQU", "username": "poorkane" },
                "urls": {
                    "raw": "https://images.unsplash.com/photo-1?ixid=abc",
                    "full": "https://images.unsplash.com/photo-1?q=85&ixid=abc",
                    "regular": "https://images.unsplash.com/photo-1?w=1080&ixid=abc",
                    "small": "https://images.unsplash.com/photo-1?w=400&ixid=abc",
                    "thumb": "https://images.unsplash.com/photo-1?w=200&ixid=abc"
                }
            }
        ]
    }"##;

    #[test]
    fn deserializes_search_response() {
        let response: SearchPhotosResponse = serde_json::from_str(SEARCH_RESPONSE).unwrap();

        assert_eq!(response.total, 133);
        assert_eq!(response.total_pages, 7);
        assert_eq!(response.results.len(), 1);

        let photo = &response.results[0];
        assert_eq!(photo.id, "eOLpJytrbsQ");
        assert_eq!(photo.width, Some(5245));
        assert_eq!(photo.alt_description, None);
        assert!(photo.urls.small.contains("w=400"));
    }

    #[test]
    fn tolerates_missing_optional_urls() {
        let json = r#"
        {
            "total": 1,
            "total_pages": 1,
            "results": [
                {
                    "id": "abc123",
                    "urls": { "small": "https://images.unsplash.com/photo-2?w=400" }
                }
            ]
        }"#;

        let response: SearchPhotosResponse = serde_json::from_str(json).unwrap();
        let photo = &response.results[0];
        assert_eq!(photo.urls.raw, None);
        assert_eq!(photo.description, None);
    }
}
