//! 账号身份信息（id、显示名、外部平台绑定）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// XMPP 服务域名，用于拼接好友的 jid
pub const XMPP_DOMAIN: &str = "prod.ol.epicgames.com";

/// 外部平台绑定信息（PSN、XBL 等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuth {
    #[serde(rename = "type", default)]
    pub auth_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_auth_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_display_name: Option<String>,
    /// 其余未建模的字段，原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 服务端的 externalAuths 有时是列表，有时是以平台为 key 的对象
pub(crate) fn deserialize_external_auths<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<ExternalAuth>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<ExternalAuth>),
        Map(BTreeMap<String, ExternalAuth>),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        Raw::List(list) => list,
        Raw::Map(map) => map
            .into_iter()
            .map(|(key, mut auth)| {
                if auth.auth_type.is_empty() {
                    auth.auth_type = key;
                }
                auth
            })
            .collect(),
    }))
}

/// 身份字段负载
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(alias = "accountId")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_external_auths",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_auths: Option<Vec<ExternalAuth>>,
}

/// 账号身份
#[derive(Debug, Clone, PartialEq)]
pub struct UserBase {
    id: String,
    display_name: Option<String>,
    external_auths: Vec<ExternalAuth>,
}

impl UserBase {
    pub fn new(payload: &UserPayload) -> Self {
        Self {
            id: payload.id.clone(),
            display_name: payload.display_name.clone(),
            external_auths: payload.external_auths.clone().unwrap_or_default(),
        }
    }

    /// 合并更新：负载中缺失的字段保留旧值，id 不变
    pub fn update(&mut self, payload: &UserPayload) {
        if let Some(name) = &payload.display_name {
            self.display_name = Some(name.clone());
        }
        if let Some(auths) = &payload.external_auths {
            self.external_auths = auths.clone();
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// 外部平台绑定，可能为空
    pub fn external_auths(&self) -> &[ExternalAuth] {
        &self.external_auths
    }

    pub fn jid(&self) -> String {
        format!("{}@{}", self.id, XMPP_DOMAIN)
    }

    pub fn serialize(&self) -> Map<String, Value> {
        let mut raw = Map::new();
        raw.insert("id".to_string(), json!(self.id));
        raw.insert("displayName".to_string(), json!(self.display_name));
        raw.insert("externalAuths".to_string(), json!(self.external_auths));
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_account_id_alias_and_auth_map() {
        let payload: UserPayload = serde_json::from_value(json!({
            "accountId": "abc",
            "displayName": "Ninja",
            "externalAuths": {
                "psn": { "externalAuthId": "p-1", "externalDisplayName": "ninja_psn" }
            }
        }))
        .unwrap();

        let user = UserBase::new(&payload);
        assert_eq!(user.id(), "abc");
        assert_eq!(user.display_name(), Some("Ninja"));
        assert_eq!(user.external_auths().len(), 1);
        assert_eq!(user.external_auths()[0].auth_type, "psn");
        assert_eq!(user.jid(), "abc@prod.ol.epicgames.com");
    }

    #[test]
    fn update_keeps_fields_missing_from_payload() {
        let mut user = UserBase::new(&UserPayload {
            id: "abc".to_string(),
            display_name: Some("Old".to_string()),
            external_auths: Some(vec![]),
        });

        user.update(&UserPayload {
            id: "other".to_string(),
            display_name: None,
            external_auths: None,
        });

        assert_eq!(user.id(), "abc");
        assert_eq!(user.display_name(), Some("Old"));
    }
}
