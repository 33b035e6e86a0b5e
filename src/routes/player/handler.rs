use axum::extract::{Json, Query, State};

use crate::{AppState, error::ProxyError, models::Player};

use crate::routes::ensure_configured;
use super::model::PlayerQuery;

#[axum::debug_handler]
pub async fn player_info(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Player>, ProxyError> {
    ensure_configured(&state)?;

    let player_tag = query.tag().ok_or(ProxyError::MissingPlayerTag)?;

    state
        .api
        .player(player_tag)
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("Failed to fetch player information", e))
}
