use crate::helpers::*;

#[tokio::test]
async fn test_correct_password_authenticates() {
    let gateway = test_gateway().await;
    register_artist(&gateway, "alice").await;

    let user = gateway
        .authenticate("alice", "alice-pw")
        .await
        .unwrap()
        .expect("password should match");
    assert_eq!(user.username(), "alice");
}

#[tokio::test]
async fn test_wrong_password_is_none() {
    let gateway = test_gateway().await;
    register_artist(&gateway, "alice").await;

    assert!(gateway.authenticate("alice", "nope").await.unwrap().is_none());
    assert!(gateway.authenticate("alice", "").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_user_is_none() {
    let gateway = test_gateway().await;
    assert!(gateway.authenticate("ghost", "pw").await.unwrap().is_none());
}

#[tokio::test]
async fn test_same_password_different_hashes() {
    let gateway = test_gateway().await;
    let a = gateway.register_viewer("a", "shared", "").await.unwrap();
    let b = gateway.register_viewer("b", "shared", "").await.unwrap();

    assert_ne!(a.password_hash(), b.password_hash());
    assert!(gateway.authenticate("a", "shared").await.unwrap().is_some());
    assert!(gateway.authenticate("b", "shared").await.unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_stored_hash_is_codec_error() {
    use comicstore::{constants::USERS, store::DocumentStore};
    use serde_json::json;

    let (gateway, store) = gateway_with_store().await;
    store
        .insert(
            USERS,
            document(json!({
                "username": "broken",
                "passwordHash": "not-a-phc-string",
                "variant": "artist",
                "email": "",
            })),
        )
        .await
        .unwrap();

    let err = gateway.authenticate("broken", "pw").await.unwrap_err();
    assert!(err.is_codec_error());
}
