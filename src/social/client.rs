//! 好友对象依赖的外部客户端接口
//!
//! 连接管理、鉴权、重试都在实现方，这里只约定好友对象需要的单次调用。

use crate::social::error::Result;
use crate::social::friend::types::{FriendPayload, FriendsSummary, LastOnline};
use crate::social::party::ClientParty;
use crate::social::presence::{PresenceLookup, PresenceParty};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// 好友对象向外发起的所有调用
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialClient: Send + Sync {
    async fn block_user(&self, user_id: &str) -> Result<()>;

    /// 删除好友或拒绝好友申请（服务端是同一个接口）
    async fn remove_or_decline_friend(&self, user_id: &str) -> Result<()>;

    /// 接受好友申请，返回新好友的关系负载。
    /// 身份字段可以缺失，`created` 可以为空串，由申请对象补全
    async fn accept_friend(&self, user_id: &str) -> Result<FriendPayload>;

    async fn set_nickname(&self, user_id: &str, nickname: &str) -> Result<()>;

    async fn remove_nickname(&self, user_id: &str) -> Result<()>;

    async fn set_note(&self, user_id: &str, note: &str) -> Result<()>;

    async fn remove_note(&self, user_id: &str) -> Result<()>;

    /// 整个好友列表的最近在线记录，key 为账号 ID
    async fn presence_get_last_online(&self) -> Result<HashMap<String, Vec<LastOnline>>>;

    async fn friends_get_summary(&self) -> Result<FriendsSummary>;

    /// 单向发送好友消息，不等待送达确认
    async fn send_friend_message(&self, jid: &str, content: &str) -> Result<()>;

    async fn join_party(&self, party: &PresenceParty) -> Result<ClientParty>;

    /// 邀请用户加入当前客户端所在的派对
    async fn invite_to_party(&self, user_id: &str) -> Result<()>;
}

/// 构造好友对象时注入的依赖
#[derive(Clone)]
pub struct FriendContext {
    pub client: Arc<dyn SocialClient>,
    pub presences: Arc<dyn PresenceLookup>,
}

impl FriendContext {
    pub fn new(client: Arc<dyn SocialClient>, presences: Arc<dyn PresenceLookup>) -> Self {
        Self { client, presences }
    }
}
