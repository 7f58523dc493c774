//! # Backend API Client Module
//!
//! Typed clients for the chat backend's REST API.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs            - Module exports and the ApiServices bundle
//! ├── client.rs         - ApiClient, the reqwest Transport
//! ├── chat.rs           - Chats, messages, membership (/chats)
//! ├── auth.rs           - Signup, login, account management (/auth)
//! ├── profile.rs        - Profiles and image upload (/profile)
//! └── notifications.rs  - Notifications (/notifications)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chat_client::config::ClientConfig;
//! use chat_client::core::AuthToken;
//! use chat_client::services::api::ApiServices;
//! use shared::dto::chat::{NewChat, PageWindow};
//!
//! # async fn run() -> chat_client::core::Result<()> {
//! let api = ApiServices::from_config(&ClientConfig::from_env()?)?;
//! let token = AuthToken::new("eyJhbGciOi...")?;
//!
//! let chat = api.chats.create_chat(&token, &NewChat::direct("u1", "u2")?).await?;
//! api.chats.send_text(&token, &chat.chat_id, "u1", "hi").await?;
//! let page = api.chats.get_messages(&token, &chat.chat_id, PageWindow::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod chat;
pub mod client;
pub mod notifications;
pub mod profile;

#[cfg(test)]
pub(crate) mod tests;

use std::sync::Arc;

pub use auth::AuthClient;
pub use chat::ChatClient;
pub use client::ApiClient;
pub use notifications::NotificationClient;
pub use profile::ProfileClient;

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::transport::Transport;

/// Every resource client over one shared transport.
#[derive(Clone)]
pub struct ApiServices {
    pub auth: AuthClient,
    pub chats: ChatClient,
    pub profiles: ProfileClient,
    pub notifications: NotificationClient,
}

impl ApiServices {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            auth: AuthClient::new(transport.clone()),
            chats: ChatClient::new(transport.clone()),
            profiles: ProfileClient::new(transport.clone()),
            notifications: NotificationClient::new(transport),
        }
    }

    /// Bundle backed by an [`ApiClient`] built from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ApiClient::new(config)?)))
    }
}
