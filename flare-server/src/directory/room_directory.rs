use crate::session::Session;
use flare_core::{Claim, RoomId, SessionKey, TenantId};
use std::sync::Arc;

/// A live entry surfaced during room enumeration.
pub struct DirectoryEntry {
    pub key: SessionKey,
    pub session: Arc<Session>,
}

/// Concurrent map of active sessions, keyed by (tenant, room, key).
/// Injected into the lifecycle and dispatcher as a capability so tests
/// can substitute their own; never a process global.
pub trait RoomDirectory: Send + Sync {
    /// Registers the session under its claim. An existing entry for the
    /// same key is silently replaced.
    fn put(&self, claim: &Claim, session: &Arc<Session>);

    /// Point lookup within one (tenant, room) scope.
    fn get(&self, tenant: &TenantId, room: &RoomId, key: &SessionKey) -> Option<Arc<Session>>;

    /// Identity-checked removal: the entry is evicted only if it still
    /// refers to `session`, so a connection that was replaced under the
    /// same key cannot tear down its successor's registration. Returns
    /// whether an entry was removed.
    fn remove(
        &self,
        tenant: &TenantId,
        room: &RoomId,
        key: &SessionKey,
        session: &Arc<Session>,
    ) -> bool;

    /// Enumerates the live entries of one room, in no particular order.
    /// Must stay safe under concurrent put/remove on the same scope.
    fn for_each(&self, tenant: &TenantId, room: &RoomId, f: &mut dyn FnMut(DirectoryEntry));
}
