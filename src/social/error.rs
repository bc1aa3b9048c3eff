//! 社交模块统一错误类型

use thiserror::Error;

/// 好友/在线状态相关操作可能出现的错误
#[derive(Debug, Error)]
pub enum SocialError {
    /// 服务端返回了非 2xx 响应，`message_code` 为服务端给出的错误码
    #[error("HTTP 错误 {status} ({message_code}): {message}")]
    Http {
        status: u16,
        message_code: String,
        message: String,
        numeric_code: Option<i64>,
    },

    /// 请求未能送达或响应读取失败
    #[error("请求失败: {0}")]
    Request(Box<reqwest::Error>),

    /// 本地参数校验失败，或服务端判定为输入错误
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("禁止操作: {0}")]
    Forbidden(String),

    #[error("时间解析失败: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 负载字段取值不合法（例如未知的好友方向）
    #[error("负载无效: {0}")]
    Payload(String),

    /// 实时通道（消息/派对）不可用
    #[error("实时通道未连接")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, SocialError>;

impl From<reqwest::Error> for SocialError {
    fn from(e: reqwest::Error) -> Self {
        SocialError::Request(Box::new(e))
    }
}

impl SocialError {
    /// 服务端错误码（仅 `Http` 错误才有）
    pub fn message_code(&self) -> Option<&str> {
        match self {
            SocialError::Http { message_code, .. } => Some(message_code.as_str()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SocialError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_code_only_for_http_errors() {
        let err = SocialError::Http {
            status: 400,
            message_code: "errors.com.epicgames.validation.validation_failed".to_string(),
            message: "bad alias".to_string(),
            numeric_code: Some(1040),
        };
        assert_eq!(
            err.message_code(),
            Some("errors.com.epicgames.validation.validation_failed")
        );
        assert_eq!(err.status(), Some(400));

        let err = SocialError::NotFound("party".to_string());
        assert_eq!(err.message_code(), None);
        assert_eq!(err.status(), None);
    }
}
