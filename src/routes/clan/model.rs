use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarType {
    Current,
    Log,
}

#[derive(Debug, Default, Deserialize)]
pub struct WarsQuery {
    #[serde(rename = "type")]
    pub war_type: Option<String>,
}

impl WarsQuery {
    /// 缺省为 `current`；`current` 和 `log` 以外的值（包括空串）返回 None，由接口报 400
    pub fn war_type(&self) -> Option<WarType> {
        match self.war_type.as_deref() {
            None | Some("current") => Some(WarType::Current),
            Some("log") => Some(WarType::Log),
            Some(_) => None,
        }
    }
}
