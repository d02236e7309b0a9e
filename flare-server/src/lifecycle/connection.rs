use crate::dispatch;
use crate::directory::RoomDirectory;
use crate::lifecycle::AppState;
use crate::session::{FrameSink, Session};
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use flare_core::{Claim, Envelope, ExitArgs, SignalError};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};

const INBOUND_BUFFER: usize = 64;

struct WsSink(SplitSink<WebSocket, Message>);

#[async_trait]
impl FrameSink for WsSink {
    async fn send_text(&mut self, frame: String) -> Result<(), SignalError> {
        self.0
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| SignalError::Transport(e.to_string()))
    }

    async fn close(&mut self) {
        let _ = self.0.close().await;
    }
}

/// Drives one authenticated connection from registration to teardown.
/// Teardown is the code after the event loop in this single owning
/// task, so it runs exactly once no matter which trigger fired.
pub(crate) async fn handle_socket(socket: WebSocket, claim: Claim, state: AppState) {
    let (sender, receiver) = socket.split();
    let session = Arc::new(Session::new(claim.clone(), Box::new(WsSink(sender))));

    state.directory.put(&claim, &session);
    info!(tenant = %claim.tenant, room = %claim.room, key = %claim.key, "session joined");

    match dispatch::send_members(&session, state.directory.as_ref()).await {
        Ok(()) => {
            let (in_tx, in_rx) = mpsc::channel(INBOUND_BUFFER);
            let read_task = tokio::spawn(read_frames(receiver, in_tx));
            run_event_loop(&session, &state, in_rx).await;
            read_task.abort();
        }
        Err(e) => warn!(error = %e, "join snapshot failed"),
    }

    if !state
        .directory
        .remove(&claim.tenant, &claim.room, &claim.key, &session)
    {
        debug!(key = %claim.key, "session was already deregistered");
    }
    announce_exit(state.directory.as_ref(), &claim).await;
    session.close().await;

    info!(tenant = %claim.tenant, room = %claim.room, key = %claim.key, "session closed");
}

/// Forwards raw frame bytes to the event loop. Dropping the sender on
/// transport error or close frame is the stop signal.
async fn read_frames(mut receiver: SplitStream<WebSocket>, in_tx: mpsc::Sender<Vec<u8>>) {
    while let Some(frame) = receiver.next().await {
        let raw = match frame {
            Ok(Message::Text(text)) => text.as_bytes().to_vec(),
            Ok(Message::Binary(data)) => data.to_vec(),
            Ok(Message::Close(_)) => break,
            // transport-level ping/pong is not protocol traffic
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "websocket read failed");
                break;
            }
        };
        if in_tx.send(raw).await.is_err() {
            break;
        }
    }
}

/// The single consumer for this connection: races inbound frames, the
/// keepalive ticker, and closure of the frame channel as the stop
/// signal. Frames are handled strictly in arrival order; any handler
/// or write error falls out into teardown.
async fn run_event_loop(
    session: &Arc<Session>,
    state: &AppState,
    mut in_rx: mpsc::Receiver<Vec<u8>>,
) {
    let mut ticker = interval_at(Instant::now() + state.ping_interval, state.ping_interval);
    let mut last_inbound = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(limit) = state.idle_timeout {
                    if last_inbound.elapsed() > limit {
                        warn!(key = %session.claim().key, "no inbound traffic, reaping connection");
                        break;
                    }
                }
                if let Err(e) = session.send(&Envelope::Ping).await {
                    warn!(key = %session.claim().key, error = %e, "keepalive ping failed");
                    break;
                }
            }
            frame = in_rx.recv() => {
                let Some(raw) = frame else {
                    debug!(key = %session.claim().key, "read task stopped");
                    break;
                };
                last_inbound = Instant::now();
                if let Err(e) = dispatch::dispatch(session, state.directory.as_ref(), &raw).await {
                    warn!(key = %session.claim().key, error = %e, "handler failed, closing connection");
                    break;
                }
            }
        }
    }
}

/// Tells every remaining session in the room that this one is gone.
/// Per-recipient write failures are their own connections' problem.
async fn announce_exit(directory: &dyn RoomDirectory, claim: &Claim) {
    let mut peers = Vec::new();
    directory.for_each(&claim.tenant, &claim.room, &mut |entry| peers.push(entry));

    let envelope = Envelope::Exit(ExitArgs {
        session_key: claim.key.clone(),
    });
    for peer in peers {
        if let Err(e) = peer.session.send(&envelope).await {
            warn!(peer = %peer.key, error = %e, "failed to announce exit");
        }
    }
}
