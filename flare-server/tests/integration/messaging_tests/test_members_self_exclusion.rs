use crate::utils::{TestClient, init_tracing, mint_token, spawn_app};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn members_never_contains_the_caller() {
    init_tracing();
    let addr = spawn_app(Duration::from_secs(5), None).await;

    let (mut alice, _) = TestClient::join(addr, &mint_token("acme", "lobby", "alice"))
        .await
        .expect("alice join");
    let (_bob, bob_snapshot) = TestClient::join(addr, &mint_token("acme", "lobby", "bob"))
        .await
        .expect("bob join");
    let (_carol, carol_snapshot) = TestClient::join(addr, &mint_token("acme", "lobby", "carol"))
        .await
        .expect("carol join");

    // later joiners already see earlier ones, never themselves
    assert_eq!(bob_snapshot, ["alice"]);
    let mut carol_snapshot = carol_snapshot;
    carol_snapshot.sort();
    assert_eq!(carol_snapshot, ["alice", "bob"]);

    alice.send(json!({"method": "members"})).await.unwrap();
    let frame = alice.expect("members").await.unwrap();
    let mut members: Vec<String> = frame["args"]["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    members.sort();
    assert_eq!(members, ["bob", "carol"]);
}

#[tokio::test]
async fn rooms_do_not_leak_into_each_other() {
    init_tracing();
    let addr = spawn_app(Duration::from_secs(5), None).await;

    let (_alice, _) = TestClient::join(addr, &mint_token("acme", "room-a", "alice"))
        .await
        .expect("alice join");
    let (_eve, _) = TestClient::join(addr, &mint_token("rival", "room-a", "eve"))
        .await
        .expect("eve join");
    let (mut bob, snapshot) = TestClient::join(addr, &mint_token("acme", "room-b", "bob"))
        .await
        .expect("bob join");

    // bob shares a tenant with alice and a room name with eve, but
    // neither is in (acme, room-b)
    assert!(snapshot.is_empty());

    bob.send(json!({"method": "members"})).await.unwrap();
    let frame = bob.expect("members").await.unwrap();
    assert_eq!(frame["args"]["members"].as_array().unwrap().len(), 0);
}
