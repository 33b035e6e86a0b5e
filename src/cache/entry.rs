use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::Resource;

/// 缓存有效期，固定 5 分钟
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// 单个资源的缓存值。值和获取时间总是一起写入
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Resource,
    pub fetched_at_millis: i64,
}

impl CacheEntry {
    pub fn new(value: Resource, fetched_at_millis: i64) -> Self {
        Self {
            value,
            fetched_at_millis,
        }
    }

    pub fn is_fresh(&self, now_millis: i64) -> bool {
        now_millis - self.fetched_at_millis < CACHE_TTL.as_millis() as i64
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.fetched_at_millis)
    }
}
