use axum::{
    extract::{Json, Query, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, error::ProxyError, models::Clan, models::ClanMember};

use crate::routes::ensure_configured;
use super::model::{WarType, WarsQuery};

#[axum::debug_handler]
pub async fn clan_info(State(state): State<AppState>) -> Result<Json<Clan>, ProxyError> {
    ensure_configured(&state)?;

    state
        .api
        .clan_info()
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("Failed to fetch clan information", e))
}

#[axum::debug_handler]
pub async fn clan_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClanMember>>, ProxyError> {
    ensure_configured(&state)?;

    state
        .api
        .clan_members()
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("Failed to fetch clan members", e))
}

#[axum::debug_handler]
pub async fn clan_wars(
    State(state): State<AppState>,
    Query(query): Query<WarsQuery>,
) -> Result<Response, ProxyError> {
    ensure_configured(&state)?;

    let war_type = query.war_type().ok_or(ProxyError::InvalidWarType)?;

    match war_type {
        WarType::Log => state
            .api
            .war_log()
            .await
            .map(|wars| Json(wars).into_response())
            .map_err(|e| ProxyError::upstream("Failed to fetch war log data", e)),
        WarType::Current => state
            .api
            .current_war()
            .await
            .map(|war| Json(war).into_response())
            .map_err(|e| ProxyError::upstream("Failed to fetch current war data", e)),
    }
}
