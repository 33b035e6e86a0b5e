mod clan;
mod player;
mod war;

use std::fmt;

use serde::Deserialize;

pub use clan::{Clan, ClanMember, NamedRef};
pub use player::Player;
pub use war::{CurrentWar, WarClan, WarLogEntry};

/// 缓存的四类部落资源，每类对应一个上游接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ClanInfo,
    ClanMembers,
    WarLog,
    CurrentWar,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::ClanInfo,
        ResourceKind::ClanMembers,
        ResourceKind::WarLog,
        ResourceKind::CurrentWar,
    ];

    pub fn index(self) -> usize {
        match self {
            ResourceKind::ClanInfo => 0,
            ResourceKind::ClanMembers => 1,
            ResourceKind::WarLog => 2,
            ResourceKind::CurrentWar => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::ClanInfo => "clan_info",
            ResourceKind::ClanMembers => "clan_members",
            ResourceKind::WarLog => "war_log",
            ResourceKind::CurrentWar => "current_war",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum Resource {
    ClanInfo(Clan),
    ClanMembers(Vec<ClanMember>),
    WarLog(Vec<WarLogEntry>),
    CurrentWar(CurrentWar),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::ClanInfo(_) => ResourceKind::ClanInfo,
            Resource::ClanMembers(_) => ResourceKind::ClanMembers,
            Resource::WarLog(_) => ResourceKind::WarLog,
            Resource::CurrentWar(_) => ResourceKind::CurrentWar,
        }
    }
}

/// 列表类接口的外层包装，只取 `items`
#[derive(Debug, Deserialize)]
pub struct ItemsEnvelope<T> {
    pub items: Vec<T>,
}
