use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// 上游字段为 camelCase；看板用到的字段做强类型，其余字段原样保留在 extra 里，
// 代理接口转发时不会丢字段

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    pub tag: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_wins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_ties: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_losses: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_win_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_league: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<NamedRef>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub tag: String,
    pub name: String,
    pub role: String,
    pub town_hall_level: u32,
    pub trophies: u32,
    pub donations: u32,
    pub donations_received: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClanMember {
    /// 去掉 `#` 的标签，用作看板里的成员 id
    pub fn id(&self) -> String {
        self.tag.replacen('#', "", 1)
    }
}
