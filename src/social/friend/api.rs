//! 好友 HTTP API 客户端
//!
//! 负责所有好友与最近在线相关的 HTTP 请求

use crate::social::config::ClientConfig;
use crate::social::error::Result;
use crate::social::friend::types::{FriendPayload, FriendSummaryEntry, FriendsSummary, LastOnline};
use crate::social::types::{handle_http_response, parse_body};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// 好友相关的 HTTP API 客户端
pub struct FriendsApi {
    client: reqwest::Client,
    friends_base_url: String,
    presence_base_url: String,
    account_id: String,
}

impl FriendsApi {
    /// 创建新的好友 API 客户端
    ///
    /// `client` 应该已经在外部配置好认证头
    pub fn new(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            friends_base_url: config.friends_base_url.trim_end_matches('/').to_string(),
            presence_base_url: config.presence_base_url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
        }
    }

    /// `/friends/api/v1/{accountId}{path}`
    pub(crate) fn friends_url(&self, path: &str) -> String {
        format!(
            "{}/friends/api/v1/{}{}",
            self.friends_base_url, self.account_id, path
        )
    }

    pub(crate) fn friend_list_url(&self) -> String {
        format!(
            "{}/friends/api/public/friends/{}?includePending=true",
            self.friends_base_url, self.account_id
        )
    }

    pub(crate) fn last_online_url(&self) -> String {
        format!(
            "{}/presence/api/v1/_/{}/last-online",
            self.presence_base_url, self.account_id
        )
    }

    async fn execute(&self, request: RequestBuilder, operation_name: &str) -> Result<Vec<u8>> {
        let correlation_id = Uuid::new_v4().to_string();
        debug!(
            "[FriendAPI]   账号ID: {}, 关联ID: {}",
            self.account_id, correlation_id
        );

        let response = request
            .header("X-Epic-Correlation-ID", &correlation_id)
            .send()
            .await?;

        handle_http_response(response, operation_name).await
    }

    async fn send_text(&self, method: Method, url: &str, body: &str, operation_name: &str) -> Result<()> {
        info!("[FriendAPI] 📡 请求{}", operation_name);
        debug!("[FriendAPI]   请求URL: {} {}", method, url);

        let request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body.to_string());
        self.execute(request, operation_name).await?;
        Ok(())
    }

    async fn send_empty(&self, method: Method, url: &str, operation_name: &str) -> Result<()> {
        info!("[FriendAPI] 📡 请求{}", operation_name);
        debug!("[FriendAPI]   请求URL: {} {}", method, url);

        self.execute(self.client.request(method, url), operation_name)
            .await?;
        Ok(())
    }

    /// 获取好友摘要（昵称、备注、共同好友数等）
    pub async fn get_summary(&self) -> Result<FriendsSummary> {
        let url = self.friends_url("/summary");
        info!("[FriendAPI] 📡 请求好友摘要");
        debug!("[FriendAPI]   请求URL: {}", url);

        let body = self.execute(self.client.get(&url), "好友摘要").await?;
        let summary: FriendsSummary = parse_body(&body, "好友摘要")?;

        info!(
            "[FriendAPI] ✅ 好友摘要响应，好友数: {}, 收到申请: {}, 发出申请: {}",
            summary.friends.len(),
            summary.incoming.len(),
            summary.outgoing.len()
        );
        Ok(summary)
    }

    /// 获取全量好友关系（含待处理申请）
    pub async fn get_friends(&self) -> Result<Vec<FriendPayload>> {
        let url = self.friend_list_url();
        info!("[FriendAPI] 📡 请求全量好友列表");
        debug!("[FriendAPI]   请求URL: {}", url);

        let body = self.execute(self.client.get(&url), "全量好友列表").await?;
        let friends: Vec<FriendPayload> = parse_body(&body, "全量好友列表")?;

        info!("[FriendAPI] ✅ 全量好友列表响应，条目数: {}", friends.len());
        Ok(friends)
    }

    /// 获取单个好友的摘要信息
    pub async fn get_friend(&self, user_id: &str) -> Result<FriendSummaryEntry> {
        let url = self.friends_url(&format!("/friends/{}", user_id));
        info!("[FriendAPI] 📡 请求好友信息: {}", user_id);
        debug!("[FriendAPI]   请求URL: {}", url);

        let body = self.execute(self.client.get(&url), "好友信息").await?;
        parse_body(&body, "好友信息")
    }

    /// 添加好友或接受好友申请
    pub async fn add_or_accept(&self, user_id: &str) -> Result<()> {
        let url = self.friends_url(&format!("/friends/{}", user_id));
        self.send_empty(Method::POST, &url, "添加/接受好友").await
    }

    /// 删除好友或拒绝好友申请
    pub async fn remove_or_decline(&self, user_id: &str) -> Result<()> {
        let url = self.friends_url(&format!("/friends/{}", user_id));
        self.send_empty(Method::DELETE, &url, "删除/拒绝好友").await
    }

    pub async fn block(&self, user_id: &str) -> Result<()> {
        let url = self.friends_url(&format!("/blocklist/{}", user_id));
        self.send_empty(Method::POST, &url, "拉黑用户").await
    }

    pub async fn set_alias(&self, user_id: &str, alias: &str) -> Result<()> {
        let url = self.friends_url(&format!("/friends/{}/alias", user_id));
        self.send_text(Method::PUT, &url, alias, "设置昵称").await
    }

    pub async fn remove_alias(&self, user_id: &str) -> Result<()> {
        let url = self.friends_url(&format!("/friends/{}/alias", user_id));
        self.send_empty(Method::DELETE, &url, "删除昵称").await
    }

    pub async fn set_note(&self, user_id: &str, note: &str) -> Result<()> {
        let url = self.friends_url(&format!("/friends/{}/note", user_id));
        self.send_text(Method::PUT, &url, note, "设置备注").await
    }

    pub async fn remove_note(&self, user_id: &str) -> Result<()> {
        let url = self.friends_url(&format!("/friends/{}/note", user_id));
        self.send_empty(Method::DELETE, &url, "删除备注").await
    }

    /// 获取好友列表中每个账号的最近在线记录
    pub async fn get_last_online(&self) -> Result<HashMap<String, Vec<LastOnline>>> {
        let url = self.last_online_url();
        info!("[FriendAPI] 📡 请求最近在线记录");
        debug!("[FriendAPI]   请求URL: {}", url);

        let body = self.execute(self.client.get(&url), "最近在线记录").await?;
        let records: HashMap<String, Vec<LastOnline>> = parse_body(&body, "最近在线记录")?;

        info!("[FriendAPI] ✅ 最近在线记录响应，条目数: {}", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> FriendsApi {
        let mut config = ClientConfig::new("bot".to_string(), "token".to_string());
        config.friends_base_url = "https://friends.example.com/".to_string();
        config.presence_base_url = "https://presence.example.com".to_string();
        FriendsApi::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn builds_friend_service_urls() {
        let api = api();
        assert_eq!(
            api.friends_url("/summary"),
            "https://friends.example.com/friends/api/v1/bot/summary"
        );
        assert_eq!(
            api.friends_url("/friends/abc/alias"),
            "https://friends.example.com/friends/api/v1/bot/friends/abc/alias"
        );
        assert_eq!(
            api.friend_list_url(),
            "https://friends.example.com/friends/api/public/friends/bot?includePending=true"
        );
    }

    #[test]
    fn builds_last_online_url() {
        assert_eq!(
            api().last_online_url(),
            "https://presence.example.com/presence/api/v1/_/bot/last-online"
        );
    }
}
