//! # Chat Data Transfer Objects
//!
//! Request and response structures for the `/chats` resource.
//!
//! The chat backend speaks camelCase JSON, so every type here carries
//! `#[serde(rename_all = "camelCase")]`.
//!
//! ```text
//! POST /chats/create-chat
//! Authorization: Bearer <token>
//!
//! { "participants": ["u1", "u2"], "isGroupMessage": false }
//! ```

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Default page number for paginated listings.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size for paginated listings.
pub const DEFAULT_LIMIT: u32 = 10;

/// Identifier of a user taking part in chats.
pub type UserId = String;

// region:    --- Participants

/// Non-empty set of chat members.
///
/// Equality ignores order, while iteration keeps the order the members were
/// first seen in so UIs can render them stably. Duplicate ids are collapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<UserId>", into = "Vec<UserId>")]
pub struct Participants(Vec<UserId>);

impl Participants {
    /// Build a participant set, rejecting an empty list.
    pub fn new<I, S>(ids: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        let mut seen = HashSet::new();
        let members: Vec<UserId> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        if members.is_empty() {
            return Err("participants cannot be empty".to_string());
        }
        Ok(Self(members))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.0.iter().any(|id| id == user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[UserId] {
        &self.0
    }
}

impl PartialEq for Participants {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|id| other.contains(id))
    }
}

impl Eq for Participants {}

impl TryFrom<Vec<UserId>> for Participants {
    type Error = String;

    fn try_from(ids: Vec<UserId>) -> Result<Self, Self::Error> {
        Participants::new(ids)
    }
}

impl From<Participants> for Vec<UserId> {
    fn from(participants: Participants) -> Self {
        participants.0
    }
}

// endregion: --- Participants

// region:    --- Chat

/// Body of `POST /chats/create-chat`.
///
/// Built through [`NewChat::direct`] or [`NewChat::group`] so that a group
/// name is present exactly when the chat is a group chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChat {
    pub participants: Participants,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub is_group_message: bool,
}

impl NewChat {
    /// One-to-one chat between two distinct users.
    pub fn direct(first: impl Into<UserId>, second: impl Into<UserId>) -> Result<Self, String> {
        let chat = Self {
            participants: Participants::new([first.into(), second.into()])?,
            group_name: None,
            is_group_message: false,
        };
        chat.validate()?;
        Ok(chat)
    }

    /// Named group chat.
    pub fn group<I, S>(group_name: impl Into<String>, participants: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        let chat = Self {
            participants: Participants::new(participants)?,
            group_name: Some(group_name.into()),
            is_group_message: true,
        };
        chat.validate()?;
        Ok(chat)
    }

    /// Check the shape rules: a group name exactly for group chats, and
    /// exactly two distinct participants for direct chats.
    pub fn validate(&self) -> Result<(), String> {
        match (&self.group_name, self.is_group_message) {
            (Some(name), true) if name.trim().is_empty() => {
                Err("group chats need a group name".to_string())
            }
            (Some(_), true) => Ok(()),
            (None, true) => Err("group chats need a group name".to_string()),
            (Some(_), false) => Err("direct chats cannot carry a group name".to_string()),
            (None, false) if self.participants.len() != 2 => {
                Err("a direct chat needs two distinct participants".to_string())
            }
            (None, false) => Ok(()),
        }
    }
}

/// A chat as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_id: String,
    pub participants: Participants,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default)]
    pub is_group_message: bool,
    /// Preview of the most recent message body, maintained server-side.
    #[serde(default)]
    pub last_message: String,
    /// Backing document id, when the backend echoes it.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl Chat {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.participants.contains(user_id)
    }
}

// endregion: --- Chat

// region:    --- Messages

/// Body of `POST /chats/{chatId}/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub message: String,
    pub sender: UserId,
}

impl OutgoingMessage {
    /// Build a message, rejecting blank bodies and senders.
    pub fn new(message: impl Into<String>, sender: impl Into<UserId>) -> Result<Self, String> {
        let outgoing = Self {
            message: message.into(),
            sender: sender.into(),
        };
        outgoing.validate()?;
        Ok(outgoing)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.message.trim().is_empty() {
            return Err("message cannot be empty".to_string());
        }
        if self.sender.trim().is_empty() {
            return Err("sender cannot be empty".to_string());
        }
        Ok(())
    }
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub message: String,
    pub sender: UserId,
}

/// Response of `POST /chats/{chatId}/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub message_id: String,
}

// endregion: --- Messages

// region:    --- Pagination

/// A `(page, limit)` pair bounding a listing request.
///
/// Both values are at least 1 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    page: NonZeroU32,
    limit: NonZeroU32,
}

impl PageWindow {
    pub fn new(page: NonZeroU32, limit: NonZeroU32) -> Self {
        Self { page, limit }
    }

    /// Build a window from raw numbers, rejecting zeros.
    pub fn try_new(page: u32, limit: u32) -> Result<Self, String> {
        let page = NonZeroU32::new(page).ok_or_else(|| "page must be at least 1".to_string())?;
        let limit = NonZeroU32::new(limit).ok_or_else(|| "limit must be at least 1".to_string())?;
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn limit(&self) -> u32 {
        self.limit.get()
    }

    /// Same page size, following page.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            limit: self.limit,
        }
    }

    /// Query pairs as sent on the wire.
    pub fn query(&self) -> [(&'static str, String); 2] {
        [("page", self.page().to_string()), ("limit", self.limit().to_string())]
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN.saturating_add(DEFAULT_PAGE - 1),
            limit: NonZeroU32::MIN.saturating_add(DEFAULT_LIMIT - 1),
        }
    }
}

/// Paging metadata shared by every paginated response.
pub trait Paginated {
    fn total(&self) -> u64;
    fn page(&self) -> u32;
    fn limit(&self) -> u32;
    fn item_count(&self) -> usize;

    /// Number of pages needed to cover `total` at the echoed page size.
    fn total_pages(&self) -> u64 {
        match self.limit() {
            0 => 0,
            limit => self.total().div_ceil(u64::from(limit)),
        }
    }

    fn has_next_page(&self) -> bool {
        u64::from(self.page()) < self.total_pages()
    }

    /// Window for the following page, if there is one.
    fn next_window(&self) -> Option<PageWindow> {
        if !self.has_next_page() {
            return None;
        }
        PageWindow::try_new(self.page(), self.limit()).ok().map(|w| w.next())
    }

    /// True when the backend echoed a different window than was requested.
    fn window_differs(&self, requested: PageWindow) -> bool {
        self.page() != requested.page() || self.limit() != requested.limit()
    }
}

/// Response of `GET /chats/{chatId}/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedMessages {
    pub messages: Vec<Message>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl Paginated for PaginatedMessages {
    fn total(&self) -> u64 {
        self.total
    }
    fn page(&self) -> u32 {
        self.page
    }
    fn limit(&self) -> u32 {
        self.limit
    }
    fn item_count(&self) -> usize {
        self.messages.len()
    }
}

/// Response of `GET /chats/user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedChats {
    pub chats: Vec<Chat>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl Paginated for PaginatedChats {
    fn total(&self) -> u64 {
        self.total
    }
    fn page(&self) -> u32 {
        self.page
    }
    fn limit(&self) -> u32 {
        self.limit
    }
    fn item_count(&self) -> usize {
        self.chats.len()
    }
}

// endregion: --- Pagination
