//! Session token parsing
//!
//! A token is the JSON document the identity provider stores in its session
//! cookie, `{"user":{"id":"..."}}`, either as-is or base64 encoded behind a
//! `base64-` prefix. Fields other than the user id and email are ignored.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::SessionError;
use crate::models::OwnerId;

const BASE64_PREFIX: &str = "base64-";

#[derive(Debug, Serialize, Deserialize)]
struct CookiePayload {
    #[serde(default)]
    user: Option<CookieUser>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CookieUser {
    #[serde(default)]
    id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

/// An authenticated user, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    owner_id: OwnerId,
    email: Option<String>,
}

impl Session {
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Parse a session token
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoSession`] for an empty token
    /// - [`SessionError::InvalidSession`] when the token is not decodable JSON
    /// - [`SessionError::Unauthenticated`] when it carries no user id
    pub fn from_token(token: &str) -> Result<Self, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::NoSession);
        }

        let json = match token.strip_prefix(BASE64_PREFIX) {
            Some(encoded) => decode_base64(encoded)?,
            None => token.to_string(),
        };

        let payload: CookiePayload = serde_json::from_str(&json).map_err(|e| {
            log::debug!("session token is not valid JSON: {}", e);
            SessionError::InvalidSession
        })?;

        let user = payload.user.ok_or(SessionError::Unauthenticated)?;
        match user.id {
            Some(id) if !id.trim().is_empty() => Ok(Self {
                owner_id: OwnerId::new(id),
                email: user.email,
            }),
            _ => Err(SessionError::Unauthenticated),
        }
    }

    /// Serialise back into the plain JSON token form
    pub fn to_token(&self) -> String {
        let payload = CookiePayload {
            user: Some(CookieUser {
                id: Some(self.owner_id.to_string()),
                email: self.email.clone(),
            }),
        };
        serde_json::to_string(&payload).unwrap_or_default()
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

fn decode_base64(encoded: &str) -> Result<String, SessionError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .or_else(|_| STANDARD.decode(encoded))
        .map_err(|e| {
            log::debug!("session token is not valid base64: {}", e);
            SessionError::InvalidSession
        })?;

    String::from_utf8(bytes).map_err(|_| SessionError::InvalidSession)
}
