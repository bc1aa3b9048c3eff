//! 客户端配置

/// 好友服务默认地址
pub const DEFAULT_FRIENDS_BASE_URL: &str = "https://friends-public-service-prod.ol.epicgames.com";
/// 在线状态服务默认地址
pub const DEFAULT_PRESENCE_BASE_URL: &str =
    "https://presence-public-service-prod.ol.epicgames.com";

/// 客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// 机器人账号 ID
    pub account_id: String,
    /// 访问令牌（bearer）
    pub access_token: String,
    /// 好友服务基础地址
    pub friends_base_url: String,
    /// 在线状态服务基础地址
    pub presence_base_url: String,
    /// 可选的 User-Agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new(account_id: String, access_token: String) -> Self {
        Self {
            account_id,
            access_token,
            friends_base_url: DEFAULT_FRIENDS_BASE_URL.to_string(),
            presence_base_url: DEFAULT_PRESENCE_BASE_URL.to_string(),
            user_agent: None,
        }
    }
}
