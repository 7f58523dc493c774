//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the chat backend over its REST API.
//!
//! ## Module Organization
//!
//! - [`chat`] - Chats, messages and pagination
//! - [`auth`] - Signup, login and account management
//! - [`profile`] - User profiles
//! - [`notification`] - User notifications
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase on the wire (`#[serde(rename_all = "camelCase")]`)
//! - **Optional fields**: omitted when `None`
//! - **Document ids**: the backend's `_id` is accepted where it appears
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /chats/c1/messages?page=1&limit=10
//! Authorization: Bearer eyJhbGciOi...
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "messages": [{ "messageId": "m1", "message": "hi", "sender": "u1" }],
//!   "total": 1,
//!   "page": 1,
//!   "limit": 10
//! }
//! ```

pub mod auth;
pub mod chat;
pub mod notification;
pub mod profile;

pub use auth::*;
pub use chat::*;
pub use notification::*;
pub use profile::*;
