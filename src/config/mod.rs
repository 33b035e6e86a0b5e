use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.clashofclans.com/v1";
pub const DEFAULT_CLAN_TAG: &str = "#2RRPJGQOR";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// 上游 API 的访问令牌，缺失时所有代理接口返回 500
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub clan_tag: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub dashboard_base_uri: String,
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            clan_tag: DEFAULT_CLAN_TAG.to_string(),
            server_host: "::".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            dashboard_base_uri: "/dashboard".to_string(),
            upstream_timeout_secs: 10,
        }
    }
}

// 未设置的变量使用默认值，非 UTF-8 的值仍然报错
fn var_or(key: &str, default: &str) -> Result<String, env::VarError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let api_key = var_or("COC_API_KEY", "")?;

        Ok(Config {
            api_key: Some(api_key.trim().to_string()).filter(|k| !k.is_empty()),
            api_base_url: var_or("COC_API_BASE_URL", &defaults.api_base_url)?,
            clan_tag: var_or("CLAN_TAG", &defaults.clan_tag)?,
            server_host: var_or("SERVER_HOST", &defaults.server_host)?,
            server_port: var_or("SERVER_PORT", "")?
                .parse()
                .unwrap_or(defaults.server_port),
            api_base_uri: var_or("API_BASE_URI", &defaults.api_base_uri)?,
            dashboard_base_uri: var_or("DASHBOARD_BASE_URI", &defaults.dashboard_base_uri)?,
            upstream_timeout_secs: var_or("UPSTREAM_TIMEOUT_SECS", "")?
                .trim_end_matches('s')
                .parse()
                .unwrap_or(defaults.upstream_timeout_secs),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
