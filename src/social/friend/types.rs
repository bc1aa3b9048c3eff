//! 好友 API DTO（服务端负载结构体）

use crate::social::user::{deserialize_external_auths, ExternalAuth, UserPayload};
use serde::{Deserialize, Deserializer, Serialize};

/// 反序列化数组字段，处理 null 值
pub(crate) fn deserialize_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 反序列化字符串字段，null 视为空串
fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 好友关系负载（好友列表同步或事件推送时下发）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FriendPayloadWire")]
pub struct FriendPayload {
    #[serde(flatten)]
    pub user: UserPayload,
    /// 关系状态，例如 `ACCEPTED`、`PENDING`
    pub status: String,
    /// `INBOUND` 或 `OUTGOING`
    pub direction: String,
    /// ISO-8601 创建时间
    pub created: String,
    #[serde(default)]
    pub favorite: Option<bool>,
}

/// 服务端原始格式，身份字段与关系字段平铺在同一层
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FriendPayloadWire {
    #[serde(alias = "accountId")]
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_external_auths")]
    external_auths: Option<Vec<ExternalAuth>>,
    status: String,
    direction: String,
    created: String,
    #[serde(default)]
    favorite: Option<bool>,
}

impl From<FriendPayloadWire> for FriendPayload {
    fn from(wire: FriendPayloadWire) -> Self {
        Self {
            user: UserPayload {
                id: wire.id,
                display_name: wire.display_name,
                external_auths: wire.external_auths,
            },
            status: wire.status,
            direction: wire.direction,
            created: wire.created,
            favorite: wire.favorite,
        }
    }
}

/// 好友摘要中的单个条目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendSummaryEntry {
    pub account_id: String,
    /// 昵称，未设置时为空串
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub alias: String,
    /// 备注，未设置时为空串
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub note: String,
    /// 共同好友数
    #[serde(default)]
    pub mutual: Option<u32>,
    #[serde(default)]
    pub favorite: Option<bool>,
    #[serde(default)]
    pub created: Option<String>,
}

/// 好友摘要响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FriendsSummary {
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub friends: Vec<FriendSummaryEntry>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub incoming: Vec<FriendSummaryEntry>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub outgoing: Vec<FriendSummaryEntry>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub blocklist: Vec<BlockedEntry>,
}

/// 黑名单条目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedEntry {
    pub account_id: String,
}

/// 最近一次在线记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastOnline {
    pub last_online: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn friend_payload_flattens_identity() {
        let payload: FriendPayload = serde_json::from_value(json!({
            "accountId": "abc",
            "status": "ACCEPTED",
            "direction": "INBOUND",
            "created": "2024-01-01T00:00:00.000Z",
            "favorite": false
        }))
        .unwrap();

        assert_eq!(payload.user.id, "abc");
        assert_eq!(payload.user.display_name, None);
        assert_eq!(payload.status, "ACCEPTED");
        assert_eq!(payload.favorite, Some(false));
    }

    #[test]
    fn summary_tolerates_nulls_and_missing_lists() {
        let summary: FriendsSummary = serde_json::from_value(json!({
            "friends": [
                { "accountId": "a", "alias": null, "note": "hey", "mutual": 3 },
                { "accountId": "b" }
            ],
            "incoming": null
        }))
        .unwrap();

        assert_eq!(summary.friends.len(), 2);
        assert_eq!(summary.friends[0].alias, "");
        assert_eq!(summary.friends[0].note, "hey");
        assert_eq!(summary.friends[0].mutual, Some(3));
        assert_eq!(summary.friends[1].mutual, None);
        assert!(summary.incoming.is_empty());
        assert!(summary.blocklist.is_empty());
    }
}
