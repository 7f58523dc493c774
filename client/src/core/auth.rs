//! # Auth Context
//!
//! The bearer credential handed to every authenticated operation.
//!
//! Clients never store a token: each call takes an [`AuthToken`] so that one
//! client can serve callers with different identities concurrently.

use std::fmt;
use std::str::FromStr;

use super::error::{ApiError, Result};

/// Bearer token for the `Authorization` header.
///
/// The client neither validates nor refreshes it. `Debug` never prints the
/// secret.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput("auth token cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl FromStr for AuthToken {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        AuthToken::new(s)
    }
}
