// 缓存模块
// 进程内的部落数据缓存，按资源类型各存一份，5 分钟内直接复用

mod clock;
mod entry;
mod response_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CACHE_TTL, CacheEntry};
pub use response_cache::ResponseCache;
