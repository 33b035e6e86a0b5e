pub mod clan;
pub mod dashboard;
pub mod player;

use crate::{AppState, error::ProxyError};

/// 代理接口只接受 GET，其余方法统一返回 405
pub async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

// 未配置 API key 时直接失败，不发起上游请求
fn ensure_configured(state: &AppState) -> Result<(), ProxyError> {
    if state.config.is_configured() {
        Ok(())
    } else {
        tracing::error!("COC_API_KEY is not set, rejecting proxy request");
        Err(ProxyError::NotConfigured)
    }
}
