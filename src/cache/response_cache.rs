use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{Clan, ClanMember, CurrentWar, Resource, ResourceKind, WarLogEntry};
use crate::upstream::{ClanApi, UpstreamError};

use super::{CacheEntry, Clock, SystemClock};

/// 部落数据的响应缓存
///
/// 每类资源一个槽位，各自一把锁。锁在上游请求期间一直持有，
/// 同一资源的并发请求只会有一个真正打到上游，后到的直接拿到刚写入的结果。
/// 不同资源之间互不影响。过期只在读取时检查，没有后台清理任务。
pub struct ResponseCache {
    api: Arc<dyn ClanApi>,
    clock: Arc<dyn Clock>,
    slots: [Mutex<Option<CacheEntry>>; 4],
}

fn kind_mismatch(expected: ResourceKind, actual: &Resource) -> UpstreamError {
    UpstreamError::Schema(format!(
        "expected {} but received {}",
        expected,
        actual.kind()
    ))
}

impl ResponseCache {
    pub fn new(api: Arc<dyn ClanApi>) -> Self {
        Self::with_clock(api, Arc::new(SystemClock))
    }

    pub fn with_clock(api: Arc<dyn ClanApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            slots: Default::default(),
        }
    }

    fn slot(&self, kind: ResourceKind) -> &Mutex<Option<CacheEntry>> {
        &self.slots[kind.index()]
    }

    pub async fn get(&self, kind: ResourceKind) -> Result<Resource, UpstreamError> {
        let mut slot = self.slot(kind).lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.is_fresh(self.clock.now_millis()) {
                tracing::debug!("Cache hit for {}", kind);
                return Ok(entry.value.clone());
            }
            tracing::debug!("Cache entry for {} is stale", kind);
        }

        // 失败时不动已有的缓存，留给下一次请求重试
        let value = match self.api.fetch(kind).await {
            Ok(value) if value.kind() == kind => value,
            Ok(other) => return Err(kind_mismatch(kind, &other)),
            Err(e) => {
                tracing::warn!("Failed to refresh {}: {}", kind, e);
                return Err(e);
            }
        };

        let fetched_at = self.clock.now_millis();
        *slot = Some(CacheEntry::new(value.clone(), fetched_at));
        tracing::debug!("Cached {} at {}", kind, fetched_at);

        Ok(value)
    }

    /// 当前缓存内容的快照，不触发请求
    pub async fn entry(&self, kind: ResourceKind) -> Option<CacheEntry> {
        self.slot(kind).lock().await.clone()
    }

    pub async fn clear(&self) {
        for kind in ResourceKind::ALL {
            *self.slot(kind).lock().await = None;
        }
        tracing::info!("Response cache cleared");
    }

    pub async fn clan_info(&self) -> Result<Clan, UpstreamError> {
        match self.get(ResourceKind::ClanInfo).await? {
            Resource::ClanInfo(clan) => Ok(clan),
            other => Err(kind_mismatch(ResourceKind::ClanInfo, &other)),
        }
    }

    pub async fn clan_members(&self) -> Result<Vec<ClanMember>, UpstreamError> {
        match self.get(ResourceKind::ClanMembers).await? {
            Resource::ClanMembers(members) => Ok(members),
            other => Err(kind_mismatch(ResourceKind::ClanMembers, &other)),
        }
    }

    pub async fn war_log(&self) -> Result<Vec<WarLogEntry>, UpstreamError> {
        match self.get(ResourceKind::WarLog).await? {
            Resource::WarLog(wars) => Ok(wars),
            other => Err(kind_mismatch(ResourceKind::WarLog, &other)),
        }
    }

    pub async fn current_war(&self) -> Result<CurrentWar, UpstreamError> {
        match self.get(ResourceKind::CurrentWar).await? {
            Resource::CurrentWar(war) => Ok(war),
            other => Err(kind_mismatch(ResourceKind::CurrentWar, &other)),
        }
    }
}
