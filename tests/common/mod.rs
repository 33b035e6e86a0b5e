#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use clan_dashboard::{AppState, config::Config, router::create_router, upstream::CocClient};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";
pub const CLAN_TAG: &str = "#2RRPJGQOR";

/// 假的上游服务，记录每次请求的路径
#[derive(Clone, Default)]
pub struct FakeUpstream {
    requests: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<bool>>,
    malformed: Arc<Mutex<bool>>,
}

impl FakeUpstream {
    pub fn hits(&self, suffix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|path| path.ends_with(suffix))
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// 成员列表里混入一个缺少 role 的成员
    pub fn set_malformed(&self, malformed: bool) {
        *self.malformed.lock().unwrap() = malformed;
    }
}

pub fn clan_json() -> Value {
    json!({
        "tag": CLAN_TAG,
        "name": "Clash Champions",
        "description": "War twice a week. Donations required.",
        "clanLevel": 10,
        "clanPoints": 32750,
        "members": 4,
        "warWins": 150,
        "warTies": 10,
        "warLosses": 75,
        "warWinStreak": 3,
        "isFamilyFriendly": true,
        "warLeague": { "id": 48000012, "name": "Crystal League I" },
        "location": { "id": 32000006, "name": "International", "isCountry": false },
        "labels": [{ "id": 56000000, "name": "Clan Wars" }]
    })
}

pub fn members_json() -> Value {
    json!([
        { "tag": "#CK1", "name": "ClashKing", "role": "leader", "townHallLevel": 14, "trophies": 5200, "donations": 1500, "donationsReceived": 800, "expLevel": 200 },
        { "tag": "#BQ2", "name": "BarbarianQueen", "role": "coLeader", "townHallLevel": 13, "trophies": 4800, "donations": 2200, "donationsReceived": 1100 },
        { "tag": "#DS3", "name": "DragonSlayer", "role": "admin", "townHallLevel": 12, "trophies": 4200, "donations": 950, "donationsReceived": 1200 },
        { "tag": "#GT4", "name": "GoblinThief", "role": "member", "townHallLevel": 10, "trophies": 3200, "donations": 300, "donationsReceived": 0 }
    ])
}

pub fn war_log_json() -> Value {
    json!([
        { "result": "win", "endTime": "20240102T150405.000Z", "teamSize": 15, "opponent": { "tag": "#R1", "name": "Rivals" } },
        { "result": "lose", "endTime": "not-a-date", "teamSize": 15, "opponent": { "tag": "#T2", "name": "Titans" } }
    ])
}

pub fn current_war_json() -> Value {
    json!({
        "state": "inWar",
        "teamSize": 15,
        "endTime": "20240105T080000.000Z",
        "opponent": { "tag": "#N1", "name": "Next Foe" }
    })
}

pub fn player_json() -> Value {
    json!({
        "tag": "#CK1",
        "name": "ClashKing",
        "role": "leader",
        "townHallLevel": 14,
        "trophies": 5200,
        "donations": 1500,
        "donationsReceived": 800,
        "warStars": 640,
        "achievements": []
    })
}

fn reject(status: StatusCode, reason: &str) -> Response {
    (status, Json(json!({ "reason": reason, "message": format!("fake upstream: {reason}") })))
        .into_response()
}

// 校验令牌、记录请求，返回 None 表示放行
fn check(upstream: &FakeUpstream, headers: &HeaderMap, path: String) -> Option<Response> {
    upstream.requests.lock().unwrap().push(path);

    let expected = format!("Bearer {API_KEY}");
    if headers.get("authorization").and_then(|h| h.to_str().ok()) != Some(expected.as_str()) {
        return Some(reject(StatusCode::FORBIDDEN, "accessDenied"));
    }
    if *upstream.failing.lock().unwrap() {
        return Some(reject(StatusCode::SERVICE_UNAVAILABLE, "inMaintenance"));
    }
    None
}

async fn clan(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    Path(tag): Path<String>,
) -> Response {
    if let Some(rejected) = check(&upstream, &headers, format!("/clans/{tag}")) {
        return rejected;
    }
    if tag != CLAN_TAG {
        return reject(StatusCode::NOT_FOUND, "notFound");
    }
    Json(clan_json()).into_response()
}

async fn clan_resource(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    Path((tag, resource)): Path<(String, String)>,
) -> Response {
    if let Some(rejected) = check(&upstream, &headers, format!("/clans/{tag}/{resource}")) {
        return rejected;
    }
    if tag != CLAN_TAG {
        return reject(StatusCode::NOT_FOUND, "notFound");
    }
    match resource.as_str() {
        "members" if *upstream.malformed.lock().unwrap() => {
            let mut members = members_json();
            members[0].as_object_mut().unwrap().remove("role");
            Json(json!({ "items": members, "paging": { "cursors": {} } })).into_response()
        }
        "members" => Json(json!({ "items": members_json(), "paging": { "cursors": {} } })).into_response(),
        "warlog" => Json(json!({ "items": war_log_json(), "paging": { "cursors": {} } })).into_response(),
        "currentwar" => Json(current_war_json()).into_response(),
        _ => reject(StatusCode::NOT_FOUND, "notFound"),
    }
}

async fn player(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    Path(tag): Path<String>,
) -> Response {
    if let Some(rejected) = check(&upstream, &headers, format!("/players/{tag}")) {
        return rejected;
    }
    if tag != "#CK1" {
        return reject(StatusCode::NOT_FOUND, "notFound");
    }
    Json(player_json()).into_response()
}

/// 在 127.0.0.1 的随机端口启动假上游，返回 base url
pub async fn spawn_upstream() -> (String, FakeUpstream) {
    let upstream = FakeUpstream::default();
    let app = Router::new()
        .route("/v1/clans/{tag}", get(clan))
        .route("/v1/clans/{tag}/{resource}", get(clan_resource))
        .route("/v1/players/{tag}", get(player))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), upstream)
}

pub fn config_for(base_url: &str, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        api_base_url: base_url.to_string(),
        clan_tag: CLAN_TAG.to_string(),
        ..Config::default()
    }
}

pub fn state_for(config: Config) -> AppState {
    let client = CocClient::new(&config).unwrap();
    AppState::new(config, Arc::new(client))
}

/// 启动假上游并创建指向它的应用
pub async fn test_app() -> (Router, FakeUpstream) {
    let (base_url, upstream) = spawn_upstream().await;
    let app = create_router(state_for(config_for(&base_url, Some(API_KEY))));
    (app, upstream)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}
