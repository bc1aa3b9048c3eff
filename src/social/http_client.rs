//! 基于 HTTP 的 `SocialClient` 实现
//!
//! HTTP 部分走 `FriendsApi`，消息与派对转交给注入的 `RealtimeChannel`。
//! 同时持有进程内的 presence 缓存，好友对象通过 `FriendContext` 只读访问。

use crate::social::client::{FriendContext, SocialClient};
use crate::social::config::ClientConfig;
use crate::social::error::{Result, SocialError};
use crate::social::friend::api::FriendsApi;
use crate::social::friend::models::Relationship;
use crate::social::friend::types::{FriendPayload, FriendsSummary, LastOnline};
use crate::social::party::ClientParty;
use crate::social::presence::{PresenceCache, PresenceParty};
use crate::social::realtime::{OfflineRealtime, RealtimeChannel};
use crate::social::user::UserPayload;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct HttpSocialClient {
    config: ClientConfig,
    api: FriendsApi,
    presences: Arc<PresenceCache>,
    realtime: Arc<dyn RealtimeChannel>,
}

impl HttpSocialClient {
    /// 创建客户端（未连接实时通道）
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_realtime(config, Arc::new(OfflineRealtime))
    }

    /// 创建客户端（自定义实时通道）
    pub fn with_realtime(config: ClientConfig, realtime: Arc<dyn RealtimeChannel>) -> Result<Self> {
        info!("[SocialClient] 创建客户端，账号ID: {}", config.account_id);

        // 认证头通过 default_headers 自动添加
        let mut builder = reqwest::ClientBuilder::new().default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!(
                    "bearer {}",
                    config.access_token
                ))
                .map_err(|_| SocialError::InvalidArgument("无效的 token".to_string()))?,
            );
            headers
        });
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let http_client = builder.build()?;

        Ok(Self {
            api: FriendsApi::new(http_client, &config),
            presences: Arc::new(PresenceCache::new()),
            realtime,
            config,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.config.account_id
    }

    pub fn api(&self) -> &FriendsApi {
        &self.api
    }

    /// presence 缓存，由推送处理方写入
    pub fn presences(&self) -> Arc<PresenceCache> {
        self.presences.clone()
    }

    /// 构造好友对象所需的依赖
    pub fn context(self: &Arc<Self>) -> FriendContext {
        FriendContext::new(self.clone(), self.presences.clone())
    }

    /// 同步好友列表：全量关系 + 摘要中的昵称与备注
    pub async fn fetch_relationships(self: &Arc<Self>) -> Result<Vec<Relationship>> {
        let payloads = self.api.get_friends().await?;
        let summary = self.api.get_summary().await?;
        let relationships = build_relationships(self.context(), &payloads, &summary)?;
        info!(
            "[SocialClient] ✅ 好友关系同步完成，共 {} 条",
            relationships.len()
        );
        Ok(relationships)
    }
}

/// 由全量关系负载与摘要组装好友对象
pub(crate) fn build_relationships(
    ctx: FriendContext,
    payloads: &[FriendPayload],
    summary: &FriendsSummary,
) -> Result<Vec<Relationship>> {
    let entries: HashMap<&str, _> = summary
        .friends
        .iter()
        .map(|entry| (entry.account_id.as_str(), entry))
        .collect();

    let mut relationships = Vec::with_capacity(payloads.len());
    for payload in payloads {
        let mut relationship = Relationship::from_payload(ctx.clone(), payload)?;
        if let Some(friend) = relationship.as_friend_mut() {
            if let Some(entry) = entries.get(friend.id()) {
                friend.update_summary(entry);
            }
        }
        relationships.push(relationship);
    }
    debug!(
        "[SocialClient] 组装好友关系: 负载 {} 条, 摘要 {} 条",
        payloads.len(),
        summary.friends.len()
    );
    Ok(relationships)
}

#[async_trait]
impl SocialClient for HttpSocialClient {
    async fn block_user(&self, user_id: &str) -> Result<()> {
        self.api.block(user_id).await
    }

    async fn remove_or_decline_friend(&self, user_id: &str) -> Result<()> {
        self.api.remove_or_decline(user_id).await
    }

    /// 接受申请后再拉取一次好友信息，组装成已接受的关系负载。
    /// 单个好友接口不返回身份字段
    async fn accept_friend(&self, user_id: &str) -> Result<FriendPayload> {
        self.api.add_or_accept(user_id).await?;
        let entry = self.api.get_friend(user_id).await?;

        Ok(FriendPayload {
            user: UserPayload {
                id: entry.account_id,
                display_name: None,
                external_auths: None,
            },
            status: "ACCEPTED".to_string(),
            direction: "INBOUND".to_string(),
            created: entry.created.unwrap_or_default(),
            favorite: entry.favorite,
        })
    }

    async fn set_nickname(&self, user_id: &str, nickname: &str) -> Result<()> {
        self.api.set_alias(user_id, nickname).await
    }

    async fn remove_nickname(&self, user_id: &str) -> Result<()> {
        self.api.remove_alias(user_id).await
    }

    async fn set_note(&self, user_id: &str, note: &str) -> Result<()> {
        self.api.set_note(user_id, note).await
    }

    async fn remove_note(&self, user_id: &str) -> Result<()> {
        self.api.remove_note(user_id).await
    }

    async fn presence_get_last_online(&self) -> Result<HashMap<String, Vec<LastOnline>>> {
        self.api.get_last_online().await
    }

    async fn friends_get_summary(&self) -> Result<FriendsSummary> {
        self.api.get_summary().await
    }

    async fn send_friend_message(&self, jid: &str, content: &str) -> Result<()> {
        self.realtime.send_friend_message(jid, content).await
    }

    async fn join_party(&self, party: &PresenceParty) -> Result<ClientParty> {
        self.realtime.join_party(party).await
    }

    async fn invite_to_party(&self, user_id: &str) -> Result<()> {
        self.realtime.invite_to_party(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::client::MockSocialClient;
    use crate::social::friend::types::FriendSummaryEntry;
    use crate::social::presence::PresenceCache;

    fn payload(id: &str, status: &str) -> FriendPayload {
        FriendPayload {
            user: UserPayload {
                id: id.to_string(),
                display_name: None,
                external_auths: None,
            },
            status: status.to_string(),
            direction: "OUTGOING".to_string(),
            created: "2022-08-01T10:00:00.000Z".to_string(),
            favorite: None,
        }
    }

    fn entry(id: &str, alias: &str, note: &str) -> FriendSummaryEntry {
        FriendSummaryEntry {
            account_id: id.to_string(),
            alias: alias.to_string(),
            note: note.to_string(),
            mutual: Some(0),
            favorite: None,
            created: None,
        }
    }

    #[test]
    fn build_relationships_applies_summary_to_friends() {
        let ctx = FriendContext::new(
            Arc::new(MockSocialClient::new()),
            Arc::new(PresenceCache::new()),
        );
        let payloads = vec![payload("a", "ACCEPTED"), payload("b", "PENDING")];
        let summary = FriendsSummary {
            friends: vec![entry("a", "Buddy", "")],
            ..Default::default()
        };

        let relationships = build_relationships(ctx, &payloads, &summary).unwrap();
        assert_eq!(relationships.len(), 2);

        let friend = relationships[0].as_friend().unwrap();
        assert_eq!(friend.nickname(), Some("Buddy"));
        assert_eq!(friend.note(), None);
        assert!(relationships[1].as_pending().is_some());
    }

    #[test]
    fn build_relationships_fails_on_bad_timestamp() {
        let ctx = FriendContext::new(
            Arc::new(MockSocialClient::new()),
            Arc::new(PresenceCache::new()),
        );
        let mut bad = payload("a", "ACCEPTED");
        bad.created = "2022-13-45".to_string();

        let err = build_relationships(ctx, &[bad], &FriendsSummary::default()).unwrap_err();
        assert!(matches!(err, SocialError::Timestamp(_)));
    }

    #[tokio::test]
    async fn offline_realtime_rejects_party_calls() {
        let client = Arc::new(
            HttpSocialClient::new(ClientConfig::new("bot".to_string(), "token".to_string()))
                .unwrap(),
        );
        assert_eq!(client.account_id(), "bot");
        assert!(client.presences().is_empty());

        let err = client
            .send_friend_message("a@prod.ol.epicgames.com", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, SocialError::NotConnected));
        assert!(matches!(
            client.invite_to_party("a").await,
            Err(SocialError::NotConnected)
        ));
    }
}
