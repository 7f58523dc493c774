//! # Chat Membership State
//!
//! Per-participant view of a chat's lifecycle.
//!
//! ```text
//!   Active ⇄ Archived        (archive / unarchive)
//!   Unmuted ⇄ Muted          (mute / unmute)
//!   NotLeft → Left           (leave)
//!   any ──delete──▶ Deleted  (terminal)
//! ```
//!
//! The three axes are independent: archiving neither mutes nor leaves.
//! The clients do not keep this state; callers that want a local mirror
//! feed every successful [`MembershipChange`] into [`MembershipState::apply`].

use thiserror::Error;

/// A membership-affecting operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipChange {
    Archive,
    Unarchive,
    Mute,
    Unmute,
    Leave,
    Delete,
}

impl MembershipChange {
    pub const ALL: [MembershipChange; 6] = [
        MembershipChange::Archive,
        MembershipChange::Unarchive,
        MembershipChange::Mute,
        MembershipChange::Unmute,
        MembershipChange::Leave,
        MembershipChange::Delete,
    ];

    /// Trailing path segment of the `PATCH /chats/{chatId}/<action>` call.
    ///
    /// `None` for [`MembershipChange::Delete`], which is `DELETE /chats/{chatId}`.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            MembershipChange::Archive => Some("archive"),
            MembershipChange::Unarchive => Some("unarchive"),
            MembershipChange::Mute => Some("mute"),
            MembershipChange::Unmute => Some("unmute"),
            MembershipChange::Leave => Some("leave"),
            MembershipChange::Delete => None,
        }
    }
}

/// Why a change cannot be applied to the local state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("chat has been deleted")]
    Deleted,
    #[error("caller already left the chat")]
    AlreadyLeft,
}

/// Coarse status for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Active,
    Archived,
    Left,
    Deleted,
}

/// Local mirror of one participant's relation to a chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MembershipState {
    archived: bool,
    muted: bool,
    left: bool,
    deleted: bool,
}

impl MembershipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_left(&self) -> bool {
        self.left
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn status(&self) -> ChatStatus {
        if self.deleted {
            ChatStatus::Deleted
        } else if self.left {
            ChatStatus::Left
        } else if self.archived {
            ChatStatus::Archived
        } else {
            ChatStatus::Active
        }
    }

    /// Apply a change. Archive, unarchive, mute and unmute are idempotent.
    pub fn apply(&mut self, change: MembershipChange) -> Result<(), MembershipError> {
        if self.deleted {
            return Err(MembershipError::Deleted);
        }

        match change {
            MembershipChange::Archive => self.archived = true,
            MembershipChange::Unarchive => self.archived = false,
            MembershipChange::Mute => self.muted = true,
            MembershipChange::Unmute => self.muted = false,
            MembershipChange::Leave => {
                if self.left {
                    return Err(MembershipError::AlreadyLeft);
                }
                self.left = true;
            }
            MembershipChange::Delete => self.deleted = true,
        }
        Ok(())
    }
}
