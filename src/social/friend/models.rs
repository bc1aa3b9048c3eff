//! 好友模型：已接受的好友、待处理的好友申请，以及二者的统一枚举

use crate::social::client::FriendContext;
use crate::social::error::{Result, SocialError};
use crate::social::friend::base::FriendBase;
use crate::social::friend::types::{FriendPayload, FriendSummaryEntry};
use crate::social::party::ClientParty;
use crate::social::presence::{Platform, Presence};
use crate::social::time::{from_iso, to_iso};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::fmt;
use std::ops::{Deref, RangeInclusive};
use tracing::{debug, info, warn};

/// 昵称长度范围（按字符计）
pub const NICKNAME_LENGTH: RangeInclusive<usize> = 3..=16;
/// 备注长度范围（按字符计）
pub const NOTE_LENGTH: RangeInclusive<usize> = 3..=255;

/// 服务端判定为输入错误的错误码，遇到时转换为 `InvalidArgument`
const INVALID_INPUT_CODES: [&str; 2] = [
    "errors.com.epicgames.common.unsupported_media_type",
    "errors.com.epicgames.validation.validation_failed",
];

fn check_length(value: &str, range: &RangeInclusive<usize>, what: &str) -> Result<()> {
    let len = value.chars().count();
    if range.contains(&len) {
        Ok(())
    } else {
        Err(SocialError::InvalidArgument(format!(
            "{}长度无效: {}（允许 {}-{}）",
            what,
            len,
            range.start(),
            range.end()
        )))
    }
}

fn map_invalid_input(err: SocialError, what: &str) -> SocialError {
    match err.message_code() {
        Some(code) if INVALID_INPUT_CODES.contains(&code) => {
            warn!("[Friend] 服务端拒绝{}: {}", what, err);
            SocialError::InvalidArgument(format!("{}无效", what))
        }
        _ => err,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// 已接受的好友
#[derive(Clone)]
pub struct Friend {
    base: FriendBase,
    favorite: Option<bool>,
    nickname: Option<String>,
    note: Option<String>,
    last_logout: Option<DateTime<Utc>>,
}

impl Deref for Friend {
    type Target = FriendBase;

    fn deref(&self) -> &FriendBase {
        &self.base
    }
}

impl Friend {
    pub fn new(ctx: FriendContext, payload: &FriendPayload) -> Result<Self> {
        Ok(Self {
            base: FriendBase::new(ctx, payload)?,
            favorite: payload.favorite,
            nickname: None,
            note: None,
            last_logout: None,
        })
    }

    pub fn base(&self) -> &FriendBase {
        &self.base
    }

    /// 合并更新；`favorite` 缺失时置为未设置
    pub fn update(&mut self, payload: &FriendPayload) -> Result<()> {
        self.base.update(payload)?;
        self.favorite = payload.favorite;
        Ok(())
    }

    /// 收到下线事件时由客户端调用
    pub fn update_last_logout(&mut self, at: DateTime<Utc>) {
        self.last_logout = Some(at);
    }

    /// 应用好友摘要中的昵称与备注，空串视为未设置
    pub fn update_summary(&mut self, entry: &FriendSummaryEntry) {
        self.nickname = non_empty(&entry.alias);
        self.note = non_empty(&entry.note);
    }

    /// 是否被标记为特别关注；服务端未给出时为 `None`
    pub fn favorite(&self) -> Option<bool> {
        self.favorite
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// 最近一次下线时间。客户端启动后才添加的好友需要先调用
    /// `fetch_last_logout` 才会有值
    pub fn last_logout(&self) -> Option<DateTime<Utc>> {
        self.last_logout
    }

    /// 最近收到的 presence。刚添加的好友在收到推送前为 `None`
    pub fn last_presence(&self) -> Option<Presence> {
        self.base.ctx.presences.get_presence(self.id())
    }

    /// 当前所在平台，没有 presence 时为 `None`
    pub fn platform(&self) -> Option<Platform> {
        self.last_presence().and_then(|p| p.platform)
    }

    /// 没有 presence 视为离线
    pub fn is_online(&self) -> bool {
        self.last_presence().map(|p| p.available).unwrap_or(false)
    }

    /// 拉取最近下线时间。响应中没有该好友时返回原有缓存值
    pub async fn fetch_last_logout(&mut self) -> Result<Option<DateTime<Utc>>> {
        let records = self.base.ctx.client.presence_get_last_online().await?;
        match records.get(self.id()).and_then(|list| list.first()) {
            Some(record) => {
                let at = from_iso(&record.last_online)?;
                self.update_last_logout(at);
            }
            None => {
                debug!("[Friend] 最近在线记录中没有好友: {}", self.id());
            }
        }
        Ok(self.last_logout)
    }

    /// 拉取共同好友数，摘要中找不到该好友时返回 `None`
    pub async fn fetch_mutual_friends_count(&self) -> Result<Option<u32>> {
        let summary = self.base.ctx.client.friends_get_summary().await?;
        let count = summary
            .friends
            .iter()
            .find(|entry| entry.account_id == self.id())
            .and_then(|entry| entry.mutual);
        if count.is_none() {
            debug!("[Friend] 好友摘要中没有共同好友数: {}", self.id());
        }
        Ok(count)
    }

    /// 设置昵称（3-16 个字符）。长度不合法时不会发起请求
    pub async fn set_nickname(&mut self, nickname: &str) -> Result<()> {
        check_length(nickname, &NICKNAME_LENGTH, "昵称")?;

        self.base
            .ctx
            .client
            .set_nickname(self.id(), nickname)
            .await
            .map_err(|e| map_invalid_input(e, "昵称"))?;

        info!("[Friend] ✅ 已设置昵称: {} -> {}", self.id(), nickname);
        self.nickname = Some(nickname.to_string());
        Ok(())
    }

    pub async fn remove_nickname(&mut self) -> Result<()> {
        self.base.ctx.client.remove_nickname(self.id()).await?;
        self.nickname = None;
        Ok(())
    }

    /// 设置备注（3-255 个字符）。长度不合法时不会发起请求
    pub async fn set_note(&mut self, note: &str) -> Result<()> {
        check_length(note, &NOTE_LENGTH, "备注")?;

        self.base
            .ctx
            .client
            .set_note(self.id(), note)
            .await
            .map_err(|e| map_invalid_input(e, "备注"))?;

        info!("[Friend] ✅ 已设置备注: {}", self.id());
        self.note = Some(note.to_string());
        Ok(())
    }

    pub async fn remove_note(&mut self) -> Result<()> {
        self.base.ctx.client.remove_note(self.id()).await?;
        self.note = None;
        Ok(())
    }

    /// 从好友列表中删除。本地对象的销毁由调用方负责
    pub async fn remove(&self) -> Result<()> {
        info!("[Friend] 删除好友: {}", self.id());
        self.base.ctx.client.remove_or_decline_friend(self.id()).await
    }

    /// 发送好友消息
    pub async fn send(&self, content: &str) -> Result<()> {
        self.base
            .ctx
            .client
            .send_friend_message(&self.jid(), content)
            .await
    }

    /// 加入该好友所在的派对
    pub async fn join_party(&self) -> Result<ClientParty> {
        let presence = self
            .last_presence()
            .ok_or_else(|| SocialError::NotFound("无法加入派对：未找到派对".to_string()))?;
        let party = presence
            .party
            .ok_or_else(|| SocialError::NotFound("无法加入派对：未找到派对".to_string()))?;

        if party.private {
            return Err(SocialError::Forbidden(
                "无法加入派对：派对为私密".to_string(),
            ));
        }

        info!("[Friend] 加入好友派对: 好友={}, 派对={:?}", self.id(), party.id);
        self.base.ctx.client.join_party(&party).await
    }

    /// 邀请该好友加入当前派对
    pub async fn invite(&self) -> Result<()> {
        self.base.ctx.client.invite_to_party(self.id()).await
    }

    pub fn serialize(&self) -> Map<String, Value> {
        let mut raw = self.base.serialize();
        raw.insert("favorite".to_string(), json!(self.favorite));
        raw.insert("nickname".to_string(), json!(self.nickname));
        raw.insert("note".to_string(), json!(self.note));
        raw.insert(
            "lastLogout".to_string(),
            json!(self.last_logout.as_ref().map(to_iso)),
        );
        raw
    }
}

impl fmt::Debug for Friend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Friend")
            .field("id", &self.id())
            .field("display_name", &self.display_name())
            .field("nickname", &self.nickname)
            .field("favorite", &self.favorite)
            .finish()
    }
}

/// 尚未处理的好友申请
#[derive(Clone)]
pub struct PendingFriend {
    base: FriendBase,
}

impl Deref for PendingFriend {
    type Target = FriendBase;

    fn deref(&self) -> &FriendBase {
        &self.base
    }
}

impl PendingFriend {
    pub fn new(ctx: FriendContext, payload: &FriendPayload) -> Result<Self> {
        Ok(Self {
            base: FriendBase::new(ctx, payload)?,
        })
    }

    pub fn base(&self) -> &FriendBase {
        &self.base
    }

    pub fn update(&mut self, payload: &FriendPayload) -> Result<()> {
        self.base.update(payload)
    }

    /// 接受申请，返回新的好友对象
    pub async fn accept(&self) -> Result<Friend> {
        let payload = self.base.ctx.client.accept_friend(self.id()).await?;
        info!("[Friend] ✅ 已接受好友申请: {}", self.id());
        Friend::new(self.base.ctx.clone(), &self.complete_accepted(payload))
    }

    /// 接受后的负载缺少的身份字段与创建时间沿用申请中的值
    fn complete_accepted(&self, mut payload: FriendPayload) -> FriendPayload {
        if payload.user.display_name.is_none() {
            payload.user.display_name = self.display_name().map(str::to_string);
        }
        if payload.user.external_auths.is_none() {
            payload.user.external_auths = Some(self.external_auths().to_vec());
        }
        if payload.created.is_empty() {
            debug!("[Friend] 接受负载缺少创建时间，沿用申请时间: {}", self.id());
            payload.created = to_iso(&self.created_at());
        }
        payload
    }

    /// 拒绝申请
    pub async fn decline(&self) -> Result<()> {
        info!("[Friend] 拒绝好友申请: {}", self.id());
        self.base.ctx.client.remove_or_decline_friend(self.id()).await
    }

    pub fn serialize(&self) -> Map<String, Value> {
        self.base.serialize()
    }
}

impl fmt::Debug for PendingFriend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFriend")
            .field("id", &self.id())
            .field("display_name", &self.display_name())
            .field("direction", &self.direction())
            .finish()
    }
}

/// 好友关系：已接受或待处理
#[derive(Debug, Clone)]
pub enum Relationship {
    Friend(Friend),
    Pending(PendingFriend),
}

impl Relationship {
    /// 按状态构造：`ACCEPTED` 为好友，其余视为待处理申请
    pub fn from_payload(ctx: FriendContext, payload: &FriendPayload) -> Result<Self> {
        if payload.status == "ACCEPTED" {
            Ok(Relationship::Friend(Friend::new(ctx, payload)?))
        } else {
            Ok(Relationship::Pending(PendingFriend::new(ctx, payload)?))
        }
    }

    pub fn base(&self) -> &FriendBase {
        match self {
            Relationship::Friend(friend) => friend.base(),
            Relationship::Pending(pending) => pending.base(),
        }
    }

    pub fn id(&self) -> &str {
        self.base().id()
    }

    pub fn as_friend(&self) -> Option<&Friend> {
        match self {
            Relationship::Friend(friend) => Some(friend),
            Relationship::Pending(_) => None,
        }
    }

    pub fn as_friend_mut(&mut self) -> Option<&mut Friend> {
        match self {
            Relationship::Friend(friend) => Some(friend),
            Relationship::Pending(_) => None,
        }
    }

    pub fn as_pending(&self) -> Option<&PendingFriend> {
        match self {
            Relationship::Pending(pending) => Some(pending),
            Relationship::Friend(_) => None,
        }
    }

    pub fn serialize(&self) -> Map<String, Value> {
        match self {
            Relationship::Friend(friend) => friend.serialize(),
            Relationship::Pending(pending) => pending.serialize(),
        }
    }
}
