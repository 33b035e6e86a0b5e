use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::{Clan, ClanMember, CurrentWar, ItemsEnvelope, Player, WarLogEntry};

use super::{ClanApi, UpstreamError};

/// Clash of Clans REST API 客户端，部落标签由配置固定
#[derive(Debug, Clone)]
pub struct CocClient {
    http: Client,
    base_url: Url,
    clan_tag: String,
    api_key: Option<String>,
}

// 去掉开头的 `#` 后统一补回，推入路径时 `#` 会被编码成 %23
fn normalize_tag(tag: &str) -> String {
    format!("#{}", tag.trim().trim_start_matches('#'))
}

impl CocClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(config.api_base_url.clone()));
        }

        let http = Client::builder()
            .timeout(config.upstream_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url,
            clan_tag: config.clan_tag.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// 拼接 `<base>/<segments...>`，每段单独做百分号编码
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn clan_endpoint(&self, suffix: Option<&str>) -> Url {
        let tag = normalize_tag(&self.clan_tag);
        match suffix {
            Some(suffix) => self.endpoint(&["clans", &tag, suffix]),
            None => self.endpoint(&["clans", &tag]),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;

        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("Upstream {} responded {}: {}", url.path(), status, body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ClanApi for CocClient {
    async fn clan_info(&self) -> Result<Clan, UpstreamError> {
        self.get_json(self.clan_endpoint(None)).await
    }

    async fn clan_members(&self) -> Result<Vec<ClanMember>, UpstreamError> {
        let envelope: ItemsEnvelope<ClanMember> =
            self.get_json(self.clan_endpoint(Some("members"))).await?;
        Ok(envelope.items)
    }

    async fn war_log(&self) -> Result<Vec<WarLogEntry>, UpstreamError> {
        let envelope: ItemsEnvelope<WarLogEntry> =
            self.get_json(self.clan_endpoint(Some("warlog"))).await?;
        Ok(envelope.items)
    }

    async fn current_war(&self) -> Result<CurrentWar, UpstreamError> {
        self.get_json(self.clan_endpoint(Some("currentwar"))).await
    }

    async fn player(&self, player_tag: &str) -> Result<Player, UpstreamError> {
        let tag = normalize_tag(player_tag);
        self.get_json(self.endpoint(&["players", &tag])).await
    }
}
