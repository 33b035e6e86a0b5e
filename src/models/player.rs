use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub tag: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_hall_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_level: Option<u32>,
    pub trophies: u32,
    pub donations: u32,
    pub donations_received: u32,
    pub war_stars: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
