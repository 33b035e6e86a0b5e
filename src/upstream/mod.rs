mod client;
mod error;

use async_trait::async_trait;

use crate::models::{Clan, ClanMember, CurrentWar, Player, Resource, ResourceKind, WarLogEntry};

pub use client::CocClient;
pub use error::UpstreamError;

/// 部落数据来源。生产环境是 [`CocClient`]，测试里可以换成计数用的假实现
#[async_trait]
pub trait ClanApi: Send + Sync {
    async fn clan_info(&self) -> Result<Clan, UpstreamError>;

    async fn clan_members(&self) -> Result<Vec<ClanMember>, UpstreamError>;

    async fn war_log(&self) -> Result<Vec<WarLogEntry>, UpstreamError>;

    async fn current_war(&self) -> Result<CurrentWar, UpstreamError>;

    async fn player(&self, player_tag: &str) -> Result<Player, UpstreamError>;

    async fn fetch(&self, kind: ResourceKind) -> Result<Resource, UpstreamError> {
        Ok(match kind {
            ResourceKind::ClanInfo => Resource::ClanInfo(self.clan_info().await?),
            ResourceKind::ClanMembers => Resource::ClanMembers(self.clan_members().await?),
            ResourceKind::WarLog => Resource::WarLog(self.war_log().await?),
            ResourceKind::CurrentWar => Resource::CurrentWar(self.current_war().await?),
        })
    }
}
