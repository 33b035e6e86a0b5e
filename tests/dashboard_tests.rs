mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use clan_dashboard::{
    AppState,
    cache::{CACHE_TTL, ManualClock, ResponseCache},
    router::create_router,
    upstream::CocClient,
};
use serde_json::json;

use common::{API_KEY, config_for, get_json, send, spawn_upstream, test_app};

#[tokio::test]
async fn members_view_sorts_searches_and_computes_ratio() {
    let (app, _upstream) = test_app().await;

    let (status, body) = get_json(&app, "/dashboard/members?sort_by=trophies&order=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    let rows = body["resp_data"]["members"].as_array().unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        ["ClashKing", "BarbarianQueen", "DragonSlayer", "GoblinThief"]
    );
    assert_eq!(rows[0]["id"], "CK1");
    assert_eq!(rows[0]["donation_ratio"], "1.88");
    assert_eq!(rows[3]["donation_ratio"], "∞");
    assert!(body["resp_data"]["last_updated"].is_string());

    let (_, body) = get_json(&app, "/dashboard/members?search=LEADER").await;
    assert_eq!(body["resp_data"]["total"], 2);
    assert_eq!(body["resp_data"]["members"][0]["name"], "BarbarianQueen");
}

#[tokio::test]
async fn dashboard_reuses_cached_members_until_refresh() {
    let (app, upstream) = test_app().await;

    get_json(&app, "/dashboard/members").await;
    get_json(&app, "/dashboard/members?sort_by=role").await;
    get_json(&app, "/dashboard/clan").await;
    assert_eq!(upstream.hits("/members"), 1);
    assert_eq!(upstream.hits("/clans/#2RRPJGQOR"), 1);

    let (status, body) = send(&app, "POST", "/dashboard/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "code": 0, "msg": "success", "resp_data": {} }));

    get_json(&app, "/dashboard/members").await;
    assert_eq!(upstream.hits("/members"), 2);
}

#[tokio::test]
async fn dashboard_refetches_after_ttl() {
    let (base_url, upstream) = spawn_upstream().await;
    let config = config_for(&base_url, Some(API_KEY));
    let api = Arc::new(CocClient::new(&config).unwrap());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let cache = ResponseCache::with_clock(api.clone(), clock.clone());
    let app = create_router(AppState::with_cache(config, api, cache));

    get_json(&app, "/dashboard/wars").await;
    clock.advance(CACHE_TTL - Duration::from_secs(1));
    get_json(&app, "/dashboard/wars").await;
    assert_eq!(upstream.hits("/warlog"), 1);
    assert_eq!(upstream.hits("/currentwar"), 1);

    clock.advance(Duration::from_secs(1));
    get_json(&app, "/dashboard/wars").await;
    assert_eq!(upstream.hits("/warlog"), 2);
    assert_eq!(upstream.hits("/currentwar"), 2);
}

#[tokio::test]
async fn clan_overview_combines_card_and_members() {
    let (app, _upstream) = test_app().await;

    let (status, body) = get_json(&app, "/dashboard/clan").await;
    assert_eq!(status, StatusCode::OK);

    let clan = &body["resp_data"]["clan"];
    assert_eq!(clan["name"], "Clash Champions");
    assert_eq!(clan["war_win_rate"], 63.8);
    assert_eq!(clan["war_league"], "Crystal League I");
    assert_eq!(clan["labels"], json!(["Clan Wars"]));
    assert_eq!(body["resp_data"]["members"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn home_shows_clan_name() {
    let (app, _upstream) = test_app().await;

    let (_, body) = get_json(&app, "/dashboard/home").await;
    assert_eq!(body["resp_data"]["name"], "Clash Champions");
}

#[tokio::test]
async fn wars_view_formats_dates_and_results() {
    let (app, _upstream) = test_app().await;

    let (status, body) = get_json(&app, "/dashboard/wars").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["resp_data"];
    assert_eq!(data["current_war"]["opponent"], "Next Foe");
    assert_eq!(data["current_war"]["state"], "inWar");
    assert_eq!(data["current_war"]["end_time"], "Jan 5, 2024, 8:00:00 AM");

    assert_eq!(data["war_log"][0]["result"], "Win");
    assert_eq!(data["war_log"][0]["end_time"], "Jan 2, 2024, 3:04:05 PM");
    assert_eq!(data["war_log"][1]["result"], "Lose");
    assert_eq!(data["war_log"][1]["end_time"], "Invalid Date");
}

#[tokio::test]
async fn member_detail_is_fetched_directly_every_time() {
    let (app, upstream) = test_app().await;

    let (status, body) = get_json(&app, "/dashboard/members/CK1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["war_stars"], 640);
    assert_eq!(body["resp_data"]["donation_ratio"], "1.88");

    get_json(&app, "/dashboard/members/CK1").await;
    assert_eq!(upstream.hits("/players/#CK1"), 2);

    let (status, body) = get_json(&app, "/dashboard/members/UNKNOWN").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["msg"],
        "Failed to load player data. Please try again later."
    );
}

#[tokio::test]
async fn upstream_failure_shows_fixed_message() {
    let (app, upstream) = test_app().await;
    upstream.set_failing(true);

    let (status, body) = get_json(&app, "/dashboard/wars").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 5002);
    assert_eq!(body["msg"], "Failed to load war data. Please try again later.");
    assert!(body.get("resp_data").is_none());

    let (status, body) = get_json(&app, "/dashboard/members").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["msg"], "Failed to load clan data. Please try again later.");
}

#[tokio::test]
async fn failed_refresh_does_not_evict_cached_view() {
    let (app, upstream) = test_app().await;

    get_json(&app, "/dashboard/home").await;
    upstream.set_failing(true);

    let (status, body) = get_json(&app, "/dashboard/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["name"], "Clash Champions");
    assert_eq!(upstream.hits("/clans/#2RRPJGQOR"), 1);
}

#[tokio::test]
async fn missing_api_key_reports_not_configured() {
    let (base_url, upstream) = spawn_upstream().await;
    let config = config_for(&base_url, None);
    let api = Arc::new(CocClient::new(&config).unwrap());
    let app = create_router(AppState::new(config, api));

    let (status, body) = get_json(&app, "/dashboard/clan").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 5001);
    assert_eq!(upstream.total_hits(), 0);
}

#[tokio::test]
async fn malformed_members_show_fixed_message_and_are_not_cached() {
    let (app, upstream) = test_app().await;
    upstream.set_malformed(true);

    let (status, body) = get_json(&app, "/dashboard/members").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 5002);
    assert_eq!(body["msg"], "Failed to load clan data. Please try again later.");

    upstream.set_malformed(false);
    let (status, body) = get_json(&app, "/dashboard/members").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["total"], 4);
    assert_eq!(upstream.hits("/members"), 2);
}
