//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the API client and the chat
//! backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::chat`]**: Chats, messages, pagination windows
//!   - **[`dto::auth`]**: Authentication and account management
//!   - **[`dto::profile`]**: User profiles
//!   - **[`dto::notification`]**: Notifications
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::chat::{NewChat, OutgoingMessage};
//!
//! let chat = NewChat::direct("u1", "u2").unwrap();
//! assert!(!chat.is_group_message);
//!
//! let msg = OutgoingMessage::new("hi", "u1").unwrap();
//! assert_eq!(msg.sender, "u1");
//! ```
//!
//! Constructors return `Result<_, String>` so that invalid requests are
//! caught before they reach the network.

pub mod dto;

// Wildcard re-exports: every type here is public API.
pub use dto::*;
