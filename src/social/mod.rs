pub mod client;
pub mod config;
pub mod error;
pub mod friend;
pub mod http_client;
pub mod party;
pub mod presence;
pub mod realtime;
pub mod time;
pub mod types;
pub mod user;

pub use client::{FriendContext, SocialClient};
pub use config::ClientConfig;
pub use error::{Result, SocialError};
pub use http_client::HttpSocialClient;
