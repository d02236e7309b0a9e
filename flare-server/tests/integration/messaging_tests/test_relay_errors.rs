use crate::utils::{TestClient, init_tracing, mint_token, spawn_app};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn relay_to_unknown_peer_closes_the_sender() {
    init_tracing();
    let addr = spawn_app(Duration::from_secs(5), None).await;

    let (mut alice, _) = TestClient::join(addr, &mint_token("acme", "lobby", "alice"))
        .await
        .expect("alice join");

    alice
        .send(json!({"method": "sdp", "args": {"dst": "ghost", "sdp": "v=0"}}))
        .await
        .unwrap();

    alice.expect_closed().await.expect("sender should be dropped");
}

#[tokio::test]
async fn relay_cannot_cross_room_boundaries() {
    init_tracing();
    let addr = spawn_app(Duration::from_secs(5), None).await;

    // x exists, but in a different room of the same tenant
    let (mut x, _) = TestClient::join(addr, &mint_token("acme", "room-a", "x"))
        .await
        .expect("x join");
    let (mut sender, _) = TestClient::join(addr, &mint_token("acme", "room-b", "sender"))
        .await
        .expect("sender join");

    sender
        .send(json!({"method": "sdp", "args": {"dst": "x", "sdp": "v=0"}}))
        .await
        .unwrap();

    sender.expect_closed().await.expect("sender should be dropped");

    // x never saw a thing
    x.assert_silence("sdp", Duration::from_millis(300)).await;
}
