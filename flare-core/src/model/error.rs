use crate::model::SessionKey;
use thiserror::Error;

/// Everything that can go wrong on a single connection. None of these
/// escape the connection that raised them; each one is terminal for it.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The upgrade request carried no usable identity. The connection is
    /// refused before it ever joins a room, so no exit is announced.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Malformed envelope or a method the server does not accept.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Relay target is not registered in the caller's tenant/room scope.
    #[error("no session {0} in room")]
    PeerNotFound(SessionKey),

    /// Read or write failure on the underlying transport.
    #[error("transport failure: {0}")]
    Transport(String),
}
