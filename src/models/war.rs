use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarClan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 部落战日志条目；联赛条目没有 result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarLogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    pub opponent: WarClan,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WarLogEntry {
    pub fn is_win(&self) -> bool {
        self.result.as_deref() == Some("win")
    }
}

/// 当前部落战；未开战时只有 state = "notInWar"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWar {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<WarClan>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
