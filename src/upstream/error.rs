use thiserror::Error;

/// 上游调用失败。可克隆，便于缓存层把同一个错误交给多个调用方
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),

    /// 上游返回了非 2xx 状态码，body 原样保存
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("unexpected upstream payload: {0}")]
    Schema(String),
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self {
        UpstreamError::Schema(e.to_string())
    }
}
