use crate::utils::{TestClient, init_tracing, mint_token, spawn_app};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn silent_client_survives_many_ping_intervals() {
    init_tracing();
    let addr = spawn_app(Duration::from_millis(100), None).await;

    let (mut client, _) = TestClient::join(addr, &mint_token("acme", "lobby", "alice"))
        .await
        .expect("join failed");

    // never answer with pong, just watch pings go by
    let mut pings = 0;
    while pings < 3 {
        let frame = client.next_frame().await.expect("connection dropped");
        if frame["method"] == "ping" {
            pings += 1;
        }
    }

    // the connection is still fully functional
    client.send(json!({"method": "members"})).await.unwrap();
    client.expect("members").await.expect("members after pings");
}

#[tokio::test]
async fn idle_timeout_reaps_silent_connections() {
    init_tracing();
    let addr = spawn_app(
        Duration::from_millis(100),
        Some(Duration::from_millis(250)),
    )
    .await;

    let (mut client, _) = TestClient::join(addr, &mint_token("acme", "lobby", "alice"))
        .await
        .expect("join failed");

    client.expect_closed().await.expect("should be reaped");
}

#[tokio::test]
async fn pong_resets_the_idle_clock() {
    init_tracing();
    let addr = spawn_app(
        Duration::from_millis(100),
        Some(Duration::from_millis(350)),
    )
    .await;

    let (mut client, _) = TestClient::join(addr, &mint_token("acme", "lobby", "alice"))
        .await
        .expect("join failed");

    // answer pings for well past the idle window
    let mut pings = 0;
    while pings < 6 {
        let frame = client.next_frame().await.expect("reaped despite pongs");
        if frame["method"] == "ping" {
            client.send(json!({"method": "pong"})).await.unwrap();
            pings += 1;
        }
    }

    client.send(json!({"method": "members"})).await.unwrap();
    client.expect("members").await.expect("still connected");
}
