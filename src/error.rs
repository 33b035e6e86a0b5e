use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::upstream::UpstreamError;

/// 代理接口的错误，响应体为 `{message, error?}`
#[derive(Debug)]
pub enum ProxyError {
    MethodNotAllowed,
    NotConfigured,
    MissingPlayerTag,
    InvalidWarType,
    Upstream {
        message: String,
        source: UpstreamError,
    },
}

impl ProxyError {
    pub fn upstream(message: impl Into<String>, source: UpstreamError) -> Self {
        ProxyError::Upstream {
            message: message.into(),
            source,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

// 上游返回 JSON 就原样放进 error，否则当作字符串
fn upstream_detail(source: &UpstreamError) -> Value {
    match source {
        UpstreamError::Status { body, .. } => {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
        }
        other => Value::String(other.to_string()),
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ProxyError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                None,
            ),
            ProxyError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key not configured".to_string(),
                None,
            ),
            ProxyError::MissingPlayerTag => (
                StatusCode::BAD_REQUEST,
                "Player tag is required".to_string(),
                None,
            ),
            ProxyError::InvalidWarType => (
                StatusCode::BAD_REQUEST,
                "War type must be current or log".to_string(),
                None,
            ),
            ProxyError::Upstream { message, source } => {
                // 5xx 还会被 log_errors 再记一次，这里只记 warn
                tracing::warn!("{}: {}", message, source);
                let status = source
                    .status()
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, message, Some(upstream_detail(&source)))
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}
