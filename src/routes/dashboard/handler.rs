use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::try_join;

use crate::{
    AppState,
    models::ResourceKind,
    upstream::UpstreamError,
    utils::{ApiResponse, error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{
    CLAN_LOAD_FAILED, ClanCard, ClanView, CurrentWarCard, HomeView, MemberQuery, MembersView,
    PLAYER_LOAD_FAILED, PlayerCard, RefreshResponse, WAR_LOAD_FAILED, WarLogCard, WarsView,
    member_rows,
};

// 看板只给出固定的错误文案，具体原因写日志
fn load_failure<T>(message: &str, err: &UpstreamError) -> (StatusCode, Json<ApiResponse<T>>) {
    tracing::error!("{} ({})", message, err);

    let (status, code) = match err {
        UpstreamError::MissingApiKey => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::NOT_CONFIGURED,
        ),
        UpstreamError::Status { status: 404, .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        UpstreamError::InvalidUrl(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
        _ => (StatusCode::BAD_GATEWAY, error_codes::UPSTREAM_ERROR),
    };

    (status, error_to_api_response(code, message.to_string()))
}

#[axum::debug_handler]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    match state.cache.clan_info().await {
        Ok(clan) => (StatusCode::OK, success_to_api_response(HomeView::from(&clan))),
        Err(e) => load_failure(CLAN_LOAD_FAILED, &e),
    }
}

#[axum::debug_handler]
pub async fn clan_overview(State(state): State<AppState>) -> impl IntoResponse {
    let (clan, members) = match try_join!(state.cache.clan_info(), state.cache.clan_members()) {
        Ok(data) => data,
        Err(e) => return load_failure::<ClanView>(CLAN_LOAD_FAILED, &e),
    };

    let last_updated = state
        .cache
        .entry(ResourceKind::ClanInfo)
        .await
        .and_then(|entry| entry.fetched_at());

    (
        StatusCode::OK,
        success_to_api_response(ClanView {
            clan: ClanCard::from(&clan),
            members: member_rows(&members, &MemberQuery::default()),
            last_updated,
        }),
    )
}

#[axum::debug_handler]
pub async fn members(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> impl IntoResponse {
    let members = match state.cache.clan_members().await {
        Ok(members) => members,
        Err(e) => return load_failure::<MembersView>(CLAN_LOAD_FAILED, &e),
    };

    let rows = member_rows(&members, &query);
    let last_updated = state
        .cache
        .entry(ResourceKind::ClanMembers)
        .await
        .and_then(|entry| entry.fetched_at());

    (
        StatusCode::OK,
        success_to_api_response(MembersView {
            total: rows.len(),
            members: rows,
            last_updated,
        }),
    )
}

/// 单个玩家不走缓存，每次直接请求
#[axum::debug_handler]
pub async fn member_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.api.player(&id).await {
        Ok(player) => (StatusCode::OK, success_to_api_response(PlayerCard::from(&player))),
        Err(e) => load_failure(PLAYER_LOAD_FAILED, &e),
    }
}

#[axum::debug_handler]
pub async fn wars(State(state): State<AppState>) -> impl IntoResponse {
    match try_join!(state.cache.war_log(), state.cache.current_war()) {
        Ok((war_log, current_war)) => (
            StatusCode::OK,
            success_to_api_response(WarsView {
                current_war: CurrentWarCard::from(&current_war),
                war_log: war_log.iter().map(WarLogCard::from).collect(),
            }),
        ),
        Err(e) => load_failure(WAR_LOAD_FAILED, &e),
    }
}

#[axum::debug_handler]
pub async fn refresh(State(state): State<AppState>) -> impl IntoResponse {
    state.cache.clear().await;
    (StatusCode::OK, success_to_api_response(RefreshResponse {}))
}
