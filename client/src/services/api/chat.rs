//! # Chat Endpoints
//!
//! Chat creation, messaging and per-participant membership operations under
//! the `/chats` resource root.
//!
//! Every method takes the caller's [`AuthToken`] and performs exactly one
//! request. Nothing is cached between calls, so one [`ChatClient`] can be
//! shared by tasks acting for different users.

use std::sync::Arc;

use shared::dto::chat::{
    Chat, NewChat, OutgoingMessage, PageWindow, Paginated, PaginatedChats, PaginatedMessages,
    SentMessage,
};

use crate::core::auth::AuthToken;
use crate::core::error::{ApiError, Result};
use crate::core::membership::MembershipChange;
use crate::core::transport::{decode, ApiRequest, Transport};

const CHATS: &str = "chats";

/// Client for the chat/messaging API.
#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn Transport>,
}

impl ChatClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a direct or group chat.
    #[tracing::instrument(skip_all, fields(
        participants = new_chat.participants.len(),
        group = new_chat.is_group_message
    ))]
    pub async fn create_chat(&self, auth: &AuthToken, new_chat: &NewChat) -> Result<Chat> {
        new_chat.validate()?;
        let request = ApiRequest::post([CHATS, "create-chat"])
            .bearer(auth)
            .json(new_chat)?;

        let chat: Chat = decode(self.transport.execute(request).await?)?;
        tracing::info!(chat_id = %chat.chat_id, "Chat created");
        Ok(chat)
    }

    /// Post a message; returns the server-assigned id.
    #[tracing::instrument(skip_all, fields(chat_id = %chat_id))]
    pub async fn send_message(
        &self,
        auth: &AuthToken,
        chat_id: &str,
        message: &OutgoingMessage,
    ) -> Result<SentMessage> {
        require_id("chat id", chat_id)?;
        message.validate()?;
        let request = ApiRequest::post([CHATS, chat_id, "messages"])
            .bearer(auth)
            .json(message)?;

        decode(self.transport.execute(request).await?)
    }

    /// Shorthand for [`ChatClient::send_message`] from raw parts.
    pub async fn send_text(
        &self,
        auth: &AuthToken,
        chat_id: &str,
        sender: &str,
        text: &str,
    ) -> Result<SentMessage> {
        let message = OutgoingMessage::new(text, sender)?;
        self.send_message(auth, chat_id, &message).await
    }

    /// One page of a chat's messages.
    ///
    /// A window past the end yields an empty page, not an error.
    #[tracing::instrument(skip_all, fields(chat_id = %chat_id, page = window.page(), limit = window.limit()))]
    pub async fn get_messages(
        &self,
        auth: &AuthToken,
        chat_id: &str,
        window: PageWindow,
    ) -> Result<PaginatedMessages> {
        require_id("chat id", chat_id)?;
        let request = ApiRequest::get([CHATS, chat_id, "messages"])
            .query_pairs(window.query())
            .bearer(auth);

        let page: PaginatedMessages = decode(self.transport.execute(request).await?)?;
        warn_on_window_mismatch(&page, window);
        Ok(page)
    }

    /// Mark every message of the chat read for the caller.
    #[tracing::instrument(skip_all, fields(chat_id = %chat_id))]
    pub async fn mark_messages_as_read(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        require_id("chat id", chat_id)?;
        let request = ApiRequest::patch([CHATS, chat_id, "messages", "read"]).bearer(auth);
        self.transport.execute(request).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(chat_id = %chat_id, message_id = %message_id))]
    pub async fn delete_message(
        &self,
        auth: &AuthToken,
        chat_id: &str,
        message_id: &str,
    ) -> Result<()> {
        require_id("chat id", chat_id)?;
        require_id("message id", message_id)?;
        let request = ApiRequest::delete([CHATS, chat_id, "messages", message_id]).bearer(auth);
        self.transport.execute(request).await?;
        Ok(())
    }

    pub async fn archive_chat(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        self.update_membership(auth, chat_id, MembershipChange::Archive).await
    }

    pub async fn unarchive_chat(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        self.update_membership(auth, chat_id, MembershipChange::Unarchive).await
    }

    pub async fn mute_chat(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        self.update_membership(auth, chat_id, MembershipChange::Mute).await
    }

    pub async fn unmute_chat(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        self.update_membership(auth, chat_id, MembershipChange::Unmute).await
    }

    /// Remove the caller from the chat's participants.
    pub async fn leave_chat(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        self.update_membership(auth, chat_id, MembershipChange::Leave).await
    }

    /// Hard-delete the chat and its messages.
    pub async fn delete_chat(&self, auth: &AuthToken, chat_id: &str) -> Result<()> {
        self.update_membership(auth, chat_id, MembershipChange::Delete).await
    }

    /// Issue the request behind a [`MembershipChange`].
    #[tracing::instrument(skip_all, fields(chat_id = %chat_id, change = ?change))]
    pub async fn update_membership(
        &self,
        auth: &AuthToken,
        chat_id: &str,
        change: MembershipChange,
    ) -> Result<()> {
        require_id("chat id", chat_id)?;
        let request = match change.action() {
            Some(action) => ApiRequest::patch([CHATS, chat_id, action]),
            None => ApiRequest::delete([CHATS, chat_id]),
        }
        .bearer(auth);

        self.transport.execute(request).await?;
        tracing::debug!("Membership updated");
        Ok(())
    }

    /// One page of the caller's chats.
    #[tracing::instrument(skip_all, fields(page = window.page(), limit = window.limit()))]
    pub async fn get_user_chats(
        &self,
        auth: &AuthToken,
        window: PageWindow,
    ) -> Result<PaginatedChats> {
        let request = ApiRequest::get([CHATS, "user"])
            .query_pairs(window.query())
            .bearer(auth);

        let page: PaginatedChats = decode(self.transport.execute(request).await?)?;
        warn_on_window_mismatch(&page, window);
        Ok(page)
    }
}

/// Blank ids would address the collection root instead of one item.
fn require_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} cannot be blank", kind)));
    }
    Ok(())
}

/// The server may clamp the window; callers still get the page.
fn warn_on_window_mismatch<P: Paginated>(page: &P, requested: PageWindow) {
    if page.window_differs(requested) {
        tracing::warn!(
            requested_page = requested.page(),
            requested_limit = requested.limit(),
            page = page.page(),
            limit = page.limit(),
            "Server returned a different page window"
        );
    }
}
