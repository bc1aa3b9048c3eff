//! HTTP 响应处理与服务端错误结构

use crate::social::error::{Result, SocialError};
use serde::Deserialize;
use tracing::{debug, error, info};

/// 服务端统一错误响应体
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub numeric_error_code: Option<i64>,
    #[serde(default)]
    pub originating_service: Option<String>,
}

/// 由非 2xx 响应构造错误，响应体无法解析时错误码为空串。
/// 消息末尾附带出错的服务名
pub fn error_from_body(status: u16, body: &[u8]) -> SocialError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = if parsed.error_message.is_empty() {
        String::from_utf8_lossy(body).into_owned()
    } else {
        parsed.error_message
    };
    let message = match parsed.originating_service {
        Some(service) if !service.is_empty() => format!("{} [{}]", message, service),
        _ => message,
    };
    SocialError::Http {
        status,
        message_code: parsed.error_code,
        message,
        numeric_code: parsed.numeric_error_code,
    }
}

/// 通用 HTTP 响应处理：检查状态码并返回响应 body
pub async fn handle_http_response(
    response: reqwest::Response,
    operation_name: &str,
) -> Result<Vec<u8>> {
    let status = response.status();

    // body 只能读取一次
    let body_bytes = response.bytes().await?;
    let body_str = String::from_utf8_lossy(&body_bytes);
    debug!("[HTTP] {}响应 Body: {}", operation_name, body_str);

    if !status.is_success() {
        error!(
            "[HTTP] {}请求失败，HTTP状态: {}, 响应: {}",
            operation_name, status, body_str
        );
        return Err(error_from_body(status.as_u16(), &body_bytes));
    }
    info!("[HTTP] {}请求成功，HTTP状态: {}", operation_name, status);

    Ok(body_bytes.to_vec())
}

/// 反序列化响应 body，失败时打印原始内容
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8], operation_name: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        error!(
            "[HTTP] {}反序列化失败: {:?}\n原始响应: {}",
            operation_name,
            e,
            String::from_utf8_lossy(body)
        );
        SocialError::Json(e)
    })
}
