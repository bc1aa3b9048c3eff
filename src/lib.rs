pub mod social;

// 重新导出常用类型，方便外部使用
pub use social::{
    client::{FriendContext, SocialClient},
    config::ClientConfig,
    error::{Result, SocialError},
    friend::{Direction, Friend, FriendBase, FriendPayload, PendingFriend, Relationship},
    http_client::HttpSocialClient,
    presence::{Platform, Presence, PresenceCache, PresenceLookup},
    realtime::{OfflineRealtime, RealtimeChannel},
};
