//! 派对句柄

use serde::{Deserialize, Serialize};

/// 加入派对后得到的客户端派对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParty {
    pub id: String,
    #[serde(default)]
    pub leader_id: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
}
