//! 好友模块
//!
//! 好友关系模型（`Friend`、`PendingFriend`）及其 HTTP API

pub mod api;
pub mod base;
pub mod models;
pub mod types;

// 重新导出主要类型
pub use api::FriendsApi;
pub use base::{Direction, FriendBase};
pub use models::{Friend, PendingFriend, Relationship, NICKNAME_LENGTH, NOTE_LENGTH};
pub use types::{FriendPayload, FriendSummaryEntry, FriendsSummary, LastOnline};
