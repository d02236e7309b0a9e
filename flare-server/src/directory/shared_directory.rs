use crate::directory::{DirectoryEntry, RoomDirectory};
use crate::session::Session;
use dashmap::DashMap;
use flare_core::{Claim, RoomId, SessionKey, TenantId};
use std::sync::{Arc, Weak};

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct RoomScope {
    tenant: TenantId,
    room: RoomId,
}

impl RoomScope {
    fn new(tenant: &TenantId, room: &RoomId) -> Self {
        Self {
            tenant: tenant.clone(),
            room: room.clone(),
        }
    }
}

/// The production directory: a sharded map of rooms, each holding weak
/// session references keyed by session key. Sessions stay owned by
/// their connection task; a ref that no longer upgrades reads as absent.
#[derive(Default)]
pub struct SharedDirectory {
    rooms: DashMap<RoomScope, DashMap<SessionKey, Weak<Session>>>,
}

impl SharedDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomDirectory for SharedDirectory {
    fn put(&self, claim: &Claim, session: &Arc<Session>) {
        let scope = RoomScope::new(&claim.tenant, &claim.room);
        self.rooms
            .entry(scope)
            .or_default()
            .insert(claim.key.clone(), Arc::downgrade(session));
    }

    fn get(&self, tenant: &TenantId, room: &RoomId, key: &SessionKey) -> Option<Arc<Session>> {
        let scope = RoomScope::new(tenant, room);
        self.rooms
            .get(&scope)
            .and_then(|members| members.get(key).and_then(|weak| weak.upgrade()))
    }

    fn remove(
        &self,
        tenant: &TenantId,
        room: &RoomId,
        key: &SessionKey,
        session: &Arc<Session>,
    ) -> bool {
        let scope = RoomScope::new(tenant, room);
        let removed = match self.rooms.get(&scope) {
            Some(members) => members
                .remove_if(key, |_, stored| {
                    std::ptr::eq(stored.as_ptr(), Arc::as_ptr(session))
                })
                .is_some(),
            None => false,
        };
        // Drop empty room entries so idle tenants cost nothing. The
        // guard from above is released before touching the outer map.
        self.rooms.remove_if(&scope, |_, members| members.is_empty());
        removed
    }

    fn for_each(&self, tenant: &TenantId, room: &RoomId, f: &mut dyn FnMut(DirectoryEntry)) {
        let scope = RoomScope::new(tenant, room);
        // Snapshot first so the callback runs outside the shard locks
        // and may itself call back into the directory.
        let entries: Vec<DirectoryEntry> = match self.rooms.get(&scope) {
            Some(members) => members
                .iter()
                .filter_map(|entry| {
                    entry.value().upgrade().map(|session| DirectoryEntry {
                        key: entry.key().clone(),
                        session,
                    })
                })
                .collect(),
            None => return,
        };

        for entry in entries {
            f(entry);
        }
    }
}
