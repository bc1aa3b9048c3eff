//! 实时通道接口（好友消息、派对）
//!
//! XMPP 会话与派对系统由外部实现，这里只约定好友对象需要的三个调用。

use crate::social::error::{Result, SocialError};
use crate::social::party::ClientParty;
use crate::social::presence::PresenceParty;
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// 单向发送好友消息
    async fn send_friend_message(&self, jid: &str, content: &str) -> Result<()>;

    async fn join_party(&self, party: &PresenceParty) -> Result<ClientParty>;

    /// 邀请用户加入当前派对
    async fn invite_to_party(&self, user_id: &str) -> Result<()>;
}

/// 默认实现：未连接实时通道，所有调用返回 `NotConnected`
pub struct OfflineRealtime;

#[async_trait]
impl RealtimeChannel for OfflineRealtime {
    async fn send_friend_message(&self, jid: &str, _content: &str) -> Result<()> {
        warn!("[Realtime] 未连接，无法发送消息: {}", jid);
        Err(SocialError::NotConnected)
    }

    async fn join_party(&self, _party: &PresenceParty) -> Result<ClientParty> {
        warn!("[Realtime] 未连接，无法加入派对");
        Err(SocialError::NotConnected)
    }

    async fn invite_to_party(&self, user_id: &str) -> Result<()> {
        warn!("[Realtime] 未连接，无法邀请: {}", user_id);
        Err(SocialError::NotConnected)
    }
}
