
pub use test_client::*;
pub use tokens::*;

use flare_server::{AppState, JwtValidator, SharedDirectory, router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Boots the real app on an ephemeral port and returns its address.
pub async fn spawn_app(ping_interval: Duration, idle_timeout: Option<Duration>) -> SocketAddr {
    let state = AppState {
        directory: Arc::new(SharedDirectory::new()),
        validator: Arc::new(JwtValidator::new(TEST_SECRET)),
        ping_interval,
        idle_timeout,
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("test server crashed");
    });

    addr
}
