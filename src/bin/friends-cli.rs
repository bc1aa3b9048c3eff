//! 好友管理 CLI
//!
//! 非交互式 CLI，用于测试好友相关功能
//! 通过命令行参数指定账号与令牌，每次执行一个子命令后退出

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fortnite_social_rust::social::time::to_iso;
use fortnite_social_rust::{ClientConfig, Friend, HttpSocialClient, Relationship};
use std::sync::Arc;
use tracing::{info, warn};

/// 好友管理 CLI
#[derive(Parser, Debug)]
#[command(name = "friends-cli")]
#[command(about = "好友管理 CLI - 用于测试好友列表相关功能", long_about = None)]
struct Args {
    /// 机器人账号 ID
    #[arg(short, long)]
    account_id: String,

    /// 访问令牌
    #[arg(short, long)]
    token: String,

    /// 好友服务地址（默认使用线上地址）
    #[arg(long)]
    friends_url: Option<String>,

    /// 在线状态服务地址（默认使用线上地址）
    #[arg(long)]
    presence_url: Option<String>,

    /// 日志级别（默认: info,fortnite_social_rust=debug）
    #[arg(long, default_value = "info,fortnite_social_rust=debug")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出全部好友关系
    List,
    /// 打印好友摘要
    Summary,
    /// 拉黑用户
    Block { user_id: String },
    /// 删除好友
    Remove { user_id: String },
    /// 接受好友申请
    Accept { user_id: String },
    /// 拒绝好友申请
    Decline { user_id: String },
    /// 设置昵称
    SetNickname { user_id: String, nickname: String },
    /// 删除昵称
    RemoveNickname { user_id: String },
    /// 设置备注
    SetNote { user_id: String, note: String },
    /// 删除备注
    RemoveNote { user_id: String },
    /// 查询最近下线时间
    LastLogout { user_id: String },
    /// 查询共同好友数
    Mutual { user_id: String },
}

/// 初始化日志
fn init_logger(log_level: &str) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .init();
}

/// 同步好友列表并找到指定的关系
async fn find_relationship(client: &Arc<HttpSocialClient>, user_id: &str) -> Result<Relationship> {
    client
        .fetch_relationships()
        .await?
        .into_iter()
        .find(|r| r.id() == user_id)
        .with_context(|| format!("好友列表中没有该用户: {}", user_id))
}

async fn find_friend(client: &Arc<HttpSocialClient>, user_id: &str) -> Result<Friend> {
    match find_relationship(client, user_id).await? {
        Relationship::Friend(friend) => Ok(friend),
        Relationship::Pending(_) => Err(anyhow::anyhow!("该用户尚未成为好友: {}", user_id)),
    }
}

fn print_relationship(relationship: &Relationship) {
    let base = relationship.base();
    match relationship {
        Relationship::Friend(friend) => info!(
            "[CLI] 👥 好友 {} | 名称: {} | 昵称: {} | 方向: {} | 创建: {}",
            base.id(),
            base.display_name().unwrap_or("-"),
            friend.nickname().unwrap_or("-"),
            base.direction(),
            to_iso(&base.created_at())
        ),
        Relationship::Pending(_) => info!(
            "[CLI] 📝 申请 {} | 状态: {} | 方向: {} | 创建: {}",
            base.id(),
            base.status(),
            base.direction(),
            to_iso(&base.created_at())
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    init_logger(&args.log_level);

    info!("[CLI] 🚀 好友管理 CLI");
    info!("[CLI] 🤖 账号ID: {}", args.account_id);

    let mut config = ClientConfig::new(args.account_id.clone(), args.token.clone());
    if let Some(url) = args.friends_url {
        config.friends_base_url = url;
    }
    if let Some(url) = args.presence_url {
        config.presence_base_url = url;
    }
    let client = Arc::new(HttpSocialClient::new(config)?);

    match args.command {
        Command::List => {
            let relationships = client.fetch_relationships().await?;
            info!("[CLI] 📋 好友关系（共 {} 条）", relationships.len());
            for relationship in &relationships {
                print_relationship(relationship);
            }
        }
        Command::Summary => {
            let summary = client.api().get_summary().await?;
            info!("[CLI] 📋 好友摘要: {}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Block { user_id } => {
            find_relationship(&client, &user_id).await?.base().block().await?;
            info!("[CLI] ✅ 已拉黑: {}", user_id);
        }
        Command::Remove { user_id } => {
            find_friend(&client, &user_id).await?.remove().await?;
            info!("[CLI] ✅ 已删除好友: {}", user_id);
        }
        Command::Accept { user_id } => match find_relationship(&client, &user_id).await? {
            Relationship::Pending(pending) => {
                let friend = pending.accept().await?;
                info!("[CLI] ✅ 已接受好友申请: {:?}", friend);
            }
            Relationship::Friend(_) => warn!("[CLI] 该用户已经是好友: {}", user_id),
        },
        Command::Decline { user_id } => match find_relationship(&client, &user_id).await? {
            Relationship::Pending(pending) => {
                pending.decline().await?;
                info!("[CLI] ✅ 已拒绝好友申请: {}", user_id);
            }
            Relationship::Friend(_) => warn!("[CLI] 该用户已经是好友: {}", user_id),
        },
        Command::SetNickname { user_id, nickname } => {
            let mut friend = find_friend(&client, &user_id).await?;
            friend.set_nickname(&nickname).await?;
            info!("[CLI] ✅ 已设置昵称: {} -> {}", user_id, nickname);
        }
        Command::RemoveNickname { user_id } => {
            let mut friend = find_friend(&client, &user_id).await?;
            friend.remove_nickname().await?;
            info!("[CLI] ✅ 已删除昵称: {}", user_id);
        }
        Command::SetNote { user_id, note } => {
            let mut friend = find_friend(&client, &user_id).await?;
            friend.set_note(&note).await?;
            info!("[CLI] ✅ 已设置备注: {}", user_id);
        }
        Command::RemoveNote { user_id } => {
            let mut friend = find_friend(&client, &user_id).await?;
            friend.remove_note().await?;
            info!("[CLI] ✅ 已删除备注: {}", user_id);
        }
        Command::LastLogout { user_id } => {
            let mut friend = find_friend(&client, &user_id).await?;
            match friend.fetch_last_logout().await? {
                Some(at) => info!("[CLI] 🕒 最近下线: {}", to_iso(&at)),
                None => info!("[CLI] 🕒 没有下线记录"),
            }
        }
        Command::Mutual { user_id } => {
            let friend = find_friend(&client, &user_id).await?;
            match friend.fetch_mutual_friends_count().await? {
                Some(count) => info!("[CLI] 🤝 共同好友数: {}", count),
                None => info!("[CLI] 🤝 摘要中没有该好友"),
            }
        }
    }

    Ok(())
}
