use axum::{
    Router,
    routing::{MethodFilter, get, on, post},
};
use tower::ServiceBuilder;

use crate::{
    AppState,
    middleware::log_errors,
    routes::{self, method_not_allowed},
};

// 代理路由，只允许 GET（HEAD 也走 405）
pub fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clan/info",
            on(MethodFilter::GET, routes::clan::clan_info).fallback(method_not_allowed),
        )
        .route(
            "/clan/members",
            on(MethodFilter::GET, routes::clan::clan_members).fallback(method_not_allowed),
        )
        .route(
            "/clan/wars",
            on(MethodFilter::GET, routes::clan::clan_wars).fallback(method_not_allowed),
        )
        .route(
            "/players/info",
            on(MethodFilter::GET, routes::player::player_info).fallback(method_not_allowed),
        )
}

// 看板路由
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(routes::dashboard::home))
        .route("/clan", get(routes::dashboard::clan_overview))
        .route("/members", get(routes::dashboard::members))
        .route("/members/{id}", get(routes::dashboard::member_detail))
        .route("/wars", get(routes::dashboard::wars))
        .route("/refresh", post(routes::dashboard::refresh))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .nest(&state.config.api_base_uri, proxy_routes())
        .nest(&state.config.dashboard_base_uri, dashboard_routes());

    // 开发模式下允许跨域
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(log_errors)))
        .with_state(state)
}
