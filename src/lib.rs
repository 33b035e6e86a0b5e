use std::sync::Arc;

use cache::ResponseCache;
use config::Config;
use upstream::ClanApi;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod router;
pub mod upstream;
pub mod utils;

pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn ClanApi>,
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    /// 看板缓存和代理接口共用同一个上游客户端
    pub fn new(config: Config, api: Arc<dyn ClanApi>) -> Self {
        let cache = Arc::new(ResponseCache::new(api.clone()));
        Self { config, api, cache }
    }

    pub fn with_cache(config: Config, api: Arc<dyn ClanApi>, cache: ResponseCache) -> Self {
        Self {
            config,
            api,
            cache: Arc::new(cache),
        }
    }
}
