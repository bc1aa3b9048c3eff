//! 好友在线状态（presence）
//!
//! presence 由客户端在收到推送时写入 `PresenceCache`，好友对象只通过
//! `PresenceLookup` 读取，每次读取都是缓存中的最新值，不做快照。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use tracing::debug;

/// 好友当前所在平台
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Mac,
    PlayStation,
    Xbox,
    Switch,
    Ios,
    Android,
    Other(String),
}

impl Platform {
    /// 由服务端平台代码构造（WIN、PSN 等）
    pub fn from_code(code: &str) -> Self {
        match code {
            "WIN" => Platform::Windows,
            "MAC" => Platform::Mac,
            "PSN" => Platform::PlayStation,
            "XBL" => Platform::Xbox,
            "SWT" => Platform::Switch,
            "IOS" => Platform::Ios,
            "AND" => Platform::Android,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Platform::Windows => "WIN",
            Platform::Mac => "MAC",
            Platform::PlayStation => "PSN",
            Platform::Xbox => "XBL",
            Platform::Switch => "SWT",
            Platform::Ios => "IOS",
            Platform::Android => "AND",
            Platform::Other(code) => code,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Platform {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Platform::from_code(&code))
    }
}

/// presence 中携带的派对信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceParty {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub size: Option<u32>,
}

/// 某个好友最近一次上报的在线状态
#[derive(Debug, Clone, PartialEq)]
pub struct Presence {
    pub user_id: String,
    /// 是否在线可用
    pub available: bool,
    pub status: Option<String>,
    pub platform: Option<Platform>,
    pub party: Option<PresenceParty>,
    pub received_at: DateTime<Utc>,
}

/// 只读的 presence 查询能力，注入到每个好友对象中
pub trait PresenceLookup: Send + Sync {
    fn get_presence(&self, user_id: &str) -> Option<Presence>;
}

/// 进程内共享的 presence 缓存，由客户端负责写入
#[derive(Debug, Default)]
pub struct PresenceCache {
    inner: RwLock<HashMap<String, Presence>>,
}

impl PresenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入（覆盖）某个用户的 presence
    pub fn insert(&self, presence: Presence) {
        debug!(
            "[Presence] 更新 presence: 用户ID={}, available={}",
            presence.user_id, presence.available
        );
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(presence.user_id.clone(), presence);
    }

    pub fn remove(&self, user_id: &str) -> Option<Presence> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.remove(user_id)
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PresenceLookup for PresenceCache {
    fn get_presence(&self, user_id: &str) -> Option<Presence> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.get(user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presence(user_id: &str, available: bool) -> Presence {
        Presence {
            user_id: user_id.to_string(),
            available,
            status: None,
            platform: Some(Platform::PlayStation),
            party: None,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn reads_always_see_latest_value() {
        let cache = PresenceCache::new();
        assert!(cache.get_presence("a").is_none());

        cache.insert(presence("a", true));
        assert!(cache.get_presence("a").unwrap().available);

        cache.insert(presence("a", false));
        assert!(!cache.get_presence("a").unwrap().available);
        assert_eq!(cache.len(), 1);

        cache.remove("a");
        assert!(cache.get_presence("a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn platform_codes() {
        assert_eq!(Platform::from_code("XBL"), Platform::Xbox);
        assert_eq!(Platform::from_code("WIN").to_string(), "WIN");
        assert_eq!(
            Platform::from_code("XSX"),
            Platform::Other("XSX".to_string())
        );
        let parsed: Platform = serde_json::from_str("\"SWT\"").unwrap();
        assert_eq!(parsed, Platform::Switch);
    }
}
