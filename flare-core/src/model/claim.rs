use crate::model::SignalError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct TenantId(pub String);

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct RoomId(pub String);

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one connection within a (tenant, room) scope. Keys are
/// free-form strings minted by whoever issues the auth tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct SessionKey(pub String);

impl From<&str> for SessionKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity bound to a connection for its whole lifetime. Produced once
/// by token validation and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claim {
    pub tenant: TenantId,
    pub room: RoomId,
    pub key: SessionKey,
}

impl Claim {
    /// All three fields must be non-empty for the claim to be usable.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.tenant.0.is_empty() {
            return Err(SignalError::Auth("claim is missing a tenant".into()));
        }
        if self.room.0.is_empty() {
            return Err(SignalError::Auth("claim is missing a room".into()));
        }
        if self.key.0.is_empty() {
            return Err(SignalError::Auth("claim is missing a session key".into()));
        }
        Ok(())
    }
}
