//! 好友关系公共部分（FriendBase）
//!
//! 身份信息加上关系元数据（状态、方向、创建时间），`Friend` 与
//! `PendingFriend` 都由它组合而来。

use crate::social::client::FriendContext;
use crate::social::error::{Result, SocialError};
use crate::social::friend::types::FriendPayload;
use crate::social::time::{from_iso, to_iso};
use crate::social::user::{ExternalAuth, UserBase};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// 好友关系的发起方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 对方发起
    Inbound,
    /// 本账号发起
    Outgoing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "INBOUND",
            Direction::Outgoing => "OUTGOING",
        }
    }
}

impl FromStr for Direction {
    type Err = SocialError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INBOUND" => Ok(Direction::Inbound),
            "OUTGOING" => Ok(Direction::Outgoing),
            other => Err(SocialError::Payload(format!("未知的好友方向: {}", other))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 好友关系公共记录
#[derive(Clone)]
pub struct FriendBase {
    user: UserBase,
    status: String,
    direction: Direction,
    created_at: DateTime<Utc>,
    pub(crate) ctx: FriendContext,
}

impl FriendBase {
    pub fn new(ctx: FriendContext, payload: &FriendPayload) -> Result<Self> {
        Ok(Self {
            user: UserBase::new(&payload.user),
            status: payload.status.clone(),
            direction: payload.direction.parse()?,
            created_at: from_iso(&payload.created)?,
            ctx,
        })
    }

    /// 用新负载合并更新状态、方向、创建时间与身份字段。
    /// 任一字段解析失败时不修改任何字段。
    pub fn update(&mut self, payload: &FriendPayload) -> Result<()> {
        let direction: Direction = payload.direction.parse()?;
        let created_at = from_iso(&payload.created)?;

        self.user.update(&payload.user);
        self.status = payload.status.clone();
        self.direction = direction;
        self.created_at = created_at;
        Ok(())
    }

    pub fn id(&self) -> &str {
        self.user.id()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.display_name()
    }

    /// 外部平台绑定，可能为空
    pub fn external_auths(&self) -> &[ExternalAuth] {
        self.user.external_auths()
    }

    pub fn jid(&self) -> String {
        self.user.jid()
    }

    /// 关系状态（例如 `ACCEPTED`），注意与 presence 中的状态不是一回事
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 是否由对方发起
    pub fn inbound(&self) -> bool {
        self.direction == Direction::Inbound
    }

    /// 是否由本账号发起
    pub fn outgoing(&self) -> bool {
        self.direction == Direction::Outgoing
    }

    /// 关系创建时间（UTC）
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 拉黑该用户。失败时原样返回传输错误，本地记录由调用方自行移除
    pub async fn block(&self) -> Result<()> {
        info!("[Friend] 拉黑用户: {}", self.id());
        self.ctx.client.block_user(self.id()).await
    }

    /// 导出为扁平 JSON，用于持久化或调试
    pub fn serialize(&self) -> Map<String, Value> {
        let mut raw = self.user.serialize();
        raw.insert("status".to_string(), json!(self.status));
        raw.insert("direction".to_string(), json!(self.direction.as_str()));
        raw.insert("created".to_string(), json!(to_iso(&self.created_at)));
        debug!("[Friend] 序列化好友关系: {}", self.id());
        raw
    }
}

impl fmt::Debug for FriendBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FriendBase")
            .field("id", &self.id())
            .field("display_name", &self.display_name())
            .field("status", &self.status)
            .field("direction", &self.direction)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::client::MockSocialClient;
    use crate::social::error::SocialError;
    use crate::social::presence::PresenceCache;
    use crate::social::user::UserPayload;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn payload(direction: &str, created: &str) -> FriendPayload {
        FriendPayload {
            user: UserPayload {
                id: "abc".to_string(),
                display_name: Some("Ninja".to_string()),
                external_auths: None,
            },
            status: "ACCEPTED".to_string(),
            direction: direction.to_string(),
            created: created.to_string(),
            favorite: None,
        }
    }

    fn context(client: MockSocialClient) -> FriendContext {
        FriendContext::new(Arc::new(client), Arc::new(PresenceCache::new()))
    }

    #[test]
    fn inbound_payload_sets_metadata() {
        let base = FriendBase::new(
            context(MockSocialClient::new()),
            &payload("INBOUND", "2024-01-01T00:00:00Z"),
        )
        .unwrap();

        assert_eq!(base.status(), "ACCEPTED");
        assert_eq!(base.direction(), Direction::Inbound);
        assert!(base.inbound());
        assert!(!base.outgoing());
        assert_eq!(
            base.created_at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn inbound_and_outgoing_are_exclusive() {
        for direction in ["INBOUND", "OUTGOING"] {
            let base = FriendBase::new(
                context(MockSocialClient::new()),
                &payload(direction, "2024-01-01T00:00:00Z"),
            )
            .unwrap();
            assert_ne!(base.inbound(), base.outgoing());
        }
    }

    #[test]
    fn update_replaces_metadata_and_keeps_identity() {
        let mut base = FriendBase::new(
            context(MockSocialClient::new()),
            &payload("INBOUND", "2024-01-01T00:00:00Z"),
        )
        .unwrap();

        let mut next = payload("OUTGOING", "2023-06-01T12:00:00.000Z");
        next.status = "PENDING".to_string();
        next.user.display_name = None;
        base.update(&next).unwrap();

        assert_eq!(base.status(), "PENDING");
        assert!(base.outgoing());
        assert_eq!(
            base.created_at(),
            Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(base.display_name(), Some("Ninja"));
    }

    #[test]
    fn malformed_payload_is_rejected_without_changes() {
        let mut base = FriendBase::new(
            context(MockSocialClient::new()),
            &payload("INBOUND", "2024-01-01T00:00:00Z"),
        )
        .unwrap();

        let err = base.update(&payload("SIDEWAYS", "2024-01-01T00:00:00Z"));
        assert!(matches!(err, Err(SocialError::Payload(_))));

        let err = base.update(&payload("OUTGOING", "not a date"));
        assert!(matches!(err, Err(SocialError::Timestamp(_))));
        assert!(base.inbound());
    }

    #[tokio::test]
    async fn block_surfaces_transport_error() {
        let mut client = MockSocialClient::new();
        client
            .expect_block_user()
            .withf(|id: &str| id == "abc")
            .times(1)
            .returning(|_| {
                Err(SocialError::Http {
                    status: 500,
                    message_code: "errors.com.epicgames.common.server_error".to_string(),
                    message: "boom".to_string(),
                    numeric_code: None,
                })
            });

        let base = FriendBase::new(context(client), &payload("INBOUND", "2024-01-01T00:00:00Z"))
            .unwrap();
        let err = base.block().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn serialize_contains_base_fields() {
        let base = FriendBase::new(
            context(MockSocialClient::new()),
            &payload("INBOUND", "2024-01-01T00:00:00Z"),
        )
        .unwrap();

        let raw = base.serialize();
        for key in ["id", "displayName", "externalAuths", "status", "direction", "created"] {
            assert!(raw.contains_key(key), "missing {}", key);
        }
        assert_eq!(raw["direction"], "INBOUND");
        assert_eq!(raw["created"], "2024-01-01T00:00:00.000Z");
    }
}
