use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    #[serde(rename = "playerTag")]
    pub player_tag: Option<String>,
}

impl PlayerQuery {
    /// 空字符串和缺省一样视为没有传
    pub fn tag(&self) -> Option<&str> {
        self.player_tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}
