use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{app_state::AppState, auth::AuthUser, domain::search::TermCount, routes::ApiError};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/top-searches",
        get(top_searches).delete(clear_top_searches),
    )
}

#[derive(Serialize)]
struct TopSearchesResponse {
    searches: Vec<TermCount>,
}

#[instrument(name = "GET /top-searches", skip(_user, app_state))]
async fn top_searches(
    _user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<TopSearchesResponse>, ApiError> {
    let searches = app_state.search.top_terms().await?;

    Ok(Json(TopSearchesResponse { searches }))
}

#[derive(Serialize)]
struct ClearTopSearchesResponse {
    message: String,
}

/// Clears the records behind the top-searches ranking — every record of
/// every user, not just the caller's.
#[instrument(name = "DELETE /top-searches", skip(user, app_state))]
async fn clear_top_searches(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<ClearTopSearchesResponse>, ApiError> {
    let deleted = app_state.search.clear_all().await?;
    tracing::info!("User {} cleared all {} search records", user.id, deleted);

    Ok(Json(ClearTopSearchesResponse {
        message: "All search records cleared successfully".to_string(),
    }))
}
