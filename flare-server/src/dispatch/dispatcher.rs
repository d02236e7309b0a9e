use crate::directory::RoomDirectory;
use crate::session::Session;
use flare_core::{Envelope, MembersArgs, RelayArgs, SignalError};
use std::sync::Arc;
use tracing::warn;

/// Routes one inbound frame for an active session. Any error returned
/// here is terminal for the sender's connection; there is no buffering
/// or partial tolerance.
pub async fn dispatch(
    session: &Arc<Session>,
    directory: &dyn RoomDirectory,
    raw: &[u8],
) -> Result<(), SignalError> {
    match Envelope::decode(raw)? {
        Envelope::Members(_) => send_members(session, directory).await,
        Envelope::Sdp(args) => relay(session, directory, Envelope::Sdp, args).await,
        Envelope::Candidate(args) => relay(session, directory, Envelope::Candidate, args).await,
        Envelope::Pong => Ok(()),
        other => Err(SignalError::Protocol(format!(
            "clients may not send {}",
            other.method()
        ))),
    }
}

/// Sends the caller the keys of every other session in its room. Used
/// both as the `members` handler and for the join snapshot.
pub async fn send_members(
    session: &Arc<Session>,
    directory: &dyn RoomDirectory,
) -> Result<(), SignalError> {
    let claim = session.claim();
    let mut members = Vec::new();
    directory.for_each(&claim.tenant, &claim.room, &mut |entry| {
        if entry.key != claim.key {
            members.push(entry.key);
        }
    });
    session.send(&Envelope::Members(MembersArgs { members })).await
}

/// Unicast, at-most-once forwarding of an opaque sdp/candidate payload.
async fn relay<F>(
    session: &Arc<Session>,
    directory: &dyn RoomDirectory,
    wrap: F,
    mut args: RelayArgs,
) -> Result<(), SignalError>
where
    F: FnOnce(RelayArgs) -> Envelope,
{
    let claim = session.claim();
    // the server, not the client, says who a frame came from
    args.src = claim.key.clone();

    let dst = directory
        .get(&claim.tenant, &claim.room, &args.dst)
        .ok_or_else(|| SignalError::PeerNotFound(args.dst.clone()))?;

    let envelope = wrap(args);
    if let Err(e) = dst.send(&envelope).await {
        // a broken destination transport is the destination's problem;
        // its own keepalive will tear it down within a tick
        warn!(dst = %dst.claim().key, error = %e, "relay write failed");
    }
    Ok(())
}
