use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    app_state::AppState, auth::AuthUser, domain::search::ImageResult, routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(search))
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    // Missing and empty are both rejected with 400 in the handler.
    term: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<ImageResult>,
}

#[instrument(name = "POST /search", skip(user, app_state, body))]
async fn search(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = body.term.unwrap_or_default();
    let results = app_state.search.search(user.id, &term).await?;

    Ok(Json(SearchResponse { results }))
}
