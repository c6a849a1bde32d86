use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::search::{SearchRecord, TimeWindow},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/history", get(get_history).delete(clear_history))
}

#[derive(Serialize)]
struct HistoryResponse {
    history: Vec<SearchRecord>,
}

#[instrument(name = "GET /history", skip(user, app_state))]
async fn get_history(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = app_state.search.history(user.id).await?;

    Ok(Json(HistoryResponse { history }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearHistoryQuery {
    time_range: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearHistoryResponse {
    message: String,
    deleted_count: u64,
}

#[instrument(name = "DELETE /history", skip(user, app_state))]
async fn clear_history(
    user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<ClearHistoryQuery>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let window = TimeWindow::parse(query.time_range.as_deref());
    let deleted_count = app_state.search.clear_history(user.id, window).await?;

    Ok(Json(ClearHistoryResponse {
        message: "History cleared successfully".to_string(),
        deleted_count,
    }))
}
