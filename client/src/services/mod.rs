//! # Services Module
//!
//! Integrations with external systems. The only one is the chat backend's
//! REST API.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! └── api/     - Backend HTTP API clients
//!                (chats, auth, profiles, notifications)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Frontend / CLI                        │
//! │                                                         │
//! │  ┌──────────────────────────────────────────────┐       │
//! │  │  ApiServices                                 │       │
//! │  │  ChatClient  AuthClient  ProfileClient  ...  │       │
//! │  └─────────────────────┬────────────────────────┘       │
//! │                        │ Arc<dyn Transport>             │
//! │               ┌────────┴────────┐                       │
//! │               │  ApiClient      │                       │
//! │               │  (reqwest)      │                       │
//! └───────────────┴────────┬────────┴───────────────────────┘
//!                          │ HTTP/JSON, Bearer token
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Chat Backend                                           │
//! │  /chats/*  /auth/*  /profile/*  /notifications/*        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`crate::core::Result`]:
//! - Non-2xx replies: `ApiError::RequestRejected` with the backend's body verbatim
//! - Network errors and timeouts: `ApiError::TransportFailure`
//! - Bodies that do not match the expected shape: `ApiError::InvalidResponse`
//! - Arguments refused before sending: `ApiError::InvalidInput`
//!
//! ## Thread Safety
//!
//! The clients hold only an `Arc<dyn Transport>`, are cheap to clone and
//! can be used from many tasks at once. `reqwest::Client` pools
//! connections internally.

pub mod api;
