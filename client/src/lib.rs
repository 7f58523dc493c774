//! # Chat Backend Client - Library Root
//!
//! Typed async client for the chat backend's REST API. This library crate
//! contains all modules used by the binary crate (`main.rs`).
//!
//! ## Features
//!
//! - **Chats**: Create direct and group chats, list a user's chats
//! - **Messages**: Send, page through, mark as read and delete messages
//! - **Membership**: Archive, mute, leave and delete chats per user
//! - **Accounts**: Signup, login, password reset, account management
//! - **Profiles & Notifications**: Profile CRUD with image upload, notification inbox
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              chat-client (this crate)                  │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client (JSON + multipart)        │
//! │  tracing       - Structured logging                    │
//! │  thiserror     - Error taxonomy                        │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP
//!          ▼
//! ┌─────────────────┐
//! │  Chat Backend   │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **core**: Transport seam, errors, auth token, chat membership state
//! - **services**: Resource clients (`api::ChatClient`, `api::AuthClient`, ...)
//! - **config**: Environment-driven [`ClientConfig`](config::ClientConfig)
//! - **logger**: tracing subscriber setup for binaries
//!
//! Wire types live in the `shared` crate.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chat_client::{ApiServices, AuthToken};
//! use chat_client::config::ClientConfig;
//! use shared::dto::chat::PageWindow;
//!
//! # async fn run() -> chat_client::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let api = ApiServices::from_config(&config)?;
//! let token = AuthToken::new("eyJhbGciOi...")?;
//!
//! let chats = api.chats.get_user_chats(&token, PageWindow::default()).await?;
//! println!("{} chats", chats.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p chat-client
//! ```
//!
//! The end-to-end tests run against an in-process axum backend bound to
//! `127.0.0.1:0`; no external services are needed.

pub mod config;
pub mod core;
pub mod logger;
pub mod services;

// Re-export commonly used types for convenience
pub use core::{ApiError, AuthToken, Result};
pub use services::api::ApiServices;
