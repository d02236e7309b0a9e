use async_trait::async_trait;
use flare_core::{Claim, Envelope, SignalError};
use tokio::sync::Mutex;

/// One outbound text frame, or close. Production wraps the WebSocket
/// sender half; tests substitute channel-backed fakes.
#[async_trait]
pub trait FrameSink: Send {
    async fn send_text(&mut self, frame: String) -> Result<(), SignalError>;
    async fn close(&mut self);
}

/// One authenticated, upgraded connection. The connection lifecycle
/// owns the `Arc`; the room directory only ever holds a weak reference.
pub struct Session {
    claim: Claim,
    sink: Mutex<Box<dyn FrameSink>>,
}

impl Session {
    pub fn new(claim: Claim, sink: Box<dyn FrameSink>) -> Self {
        Self {
            claim,
            sink: Mutex::new(sink),
        }
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    /// Serialized encode-and-send. Two call sites can write to the same
    /// transport concurrently (this connection's own loop and peers
    /// relaying into it); the lock keeps frames from interleaving. It
    /// covers exactly one write; lookups and decoding stay outside it.
    pub async fn send(&self, envelope: &Envelope) -> Result<(), SignalError> {
        let frame = envelope.encode();
        let mut sink = self.sink.lock().await;
        sink.send_text(frame).await
    }

    pub async fn close(&self) {
        self.sink.lock().await.close().await;
    }
}
