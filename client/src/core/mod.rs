//! # Core Abstractions
//!
//! Error taxonomy, auth context, the transport seam and the chat membership
//! model shared by every client.
//!
//! ## Modules
//!
//! - **[`error`]**: [`ApiError`] and the `Result<T>` alias
//! - **[`auth`]**: [`AuthToken`], the per-call bearer credential
//! - **[`transport`]**: [`Transport`] trait and the [`ApiRequest`] it executes
//! - **[`membership`]**: [`MembershipState`] transitions for archive/mute/leave/delete
//!
//! ## Dependency Injection
//!
//! Clients hold an `Arc<dyn Transport>`:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chat_client::core::Transport;
//! use chat_client::services::api::{ApiClient, ChatClient};
//!
//! // In production: the reqwest transport
//! let transport: Arc<dyn Transport> = Arc::new(ApiClient::with_base_url("http://127.0.0.1:3001").unwrap());
//! let chats = ChatClient::new(transport);
//! ```

pub mod auth;
pub mod error;
pub mod membership;
pub mod transport;

pub use auth::AuthToken;
pub use error::{ApiError, Result};
pub use membership::{ChatStatus, MembershipChange, MembershipError, MembershipState};
pub use transport::{ApiRequest, FileUpload, Method, RequestBody, Transport};
