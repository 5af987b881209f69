use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

lazy_static::lazy_static! {
    static ref SESSION_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
}

pub const DEFAULT_SESSION: &str = "default";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid session name '{0}': use 1-64 letters, numbers, '-' or '_'")]
    InvalidName(String),
}

/// Name a cart is stored under. Safe to use as a file stem.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn new(name: impl Into<String>) -> Result<Self, SessionError> {
        let name = name.into();
        if SESSION_ID_REGEX.is_match(&name) {
            Ok(Self(name))
        } else {
            Err(SessionError::InvalidName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self(DEFAULT_SESSION.to_string())
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SessionId::new(value)
    }
}

impl From<SessionId> for String {
    fn from(session: SessionId) -> Self {
        session.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_session_names() {
        assert!(SessionId::new("default").is_ok());
        assert!(SessionId::new("alice_2-cart").is_ok());
        assert_eq!(SessionId::default().as_str(), DEFAULT_SESSION);
    }

    #[test]
    fn test_rejects_path_like_names() {
        let too_long = "x".repeat(65);
        for name in ["", "..", "a/b", "../etc", "has space", too_long.as_str()] {
            assert!(SessionId::new(name).is_err(), "accepted {:?}", name);
        }
    }
}
