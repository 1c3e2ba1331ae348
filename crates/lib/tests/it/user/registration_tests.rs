use comicstore::{
    Error, UserKind,
    constants::USERS,
    store::{DocumentStore, InMemory},
    user::UserError,
};
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn test_artist_round_trip() {
    let gateway = test_gateway().await;

    gateway.register_artist("a", "p", "e@x.com").await.unwrap();
    let user = gateway.fetch_user("a").await.unwrap().unwrap();

    assert_eq!(user.kind(), UserKind::Artist);
    assert!(user.is_artist());
    assert_eq!(user.username(), "a");
    assert_eq!(user.email(), "e@x.com");
    assert_ne!(user.password_hash(), "p");
}

#[tokio::test]
async fn test_viewer_round_trip() {
    let gateway = test_gateway().await;

    gateway.register_viewer("v", "p", "v@x.com").await.unwrap();
    let user = gateway.fetch_user("v").await.unwrap().unwrap();

    assert_eq!(user.kind(), UserKind::Viewer);
    assert!(!user.is_artist());
}

#[tokio::test]
async fn test_unknown_user_is_none() {
    let gateway = test_gateway().await;
    assert!(gateway.fetch_user("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let gateway = test_gateway().await;
    gateway.register_artist("dup", "p", "").await.unwrap();

    let err = gateway.register_viewer("dup", "q", "").await.unwrap_err();
    assert!(err.is_conflict());
    assert!(matches!(
        err,
        Error::User(UserError::UsernameTaken { ref username }) if username == "dup"
    ));

    // The first registration is untouched
    let user = gateway.fetch_user("dup").await.unwrap().unwrap();
    assert_eq!(user.kind(), UserKind::Artist);
}

#[tokio::test]
async fn test_unrecognized_variant_is_corrupt() {
    let (gateway, store) = gateway_with_store().await;
    store
        .insert(
            USERS,
            document(json!({
                "username": "g",
                "passwordHash": "x",
                "variant": "ghost",
                "email": "",
            })),
        )
        .await
        .unwrap();

    let err = gateway.fetch_user("g").await.unwrap_err();
    assert!(err.is_corrupt_record());
    assert!(matches!(
        err,
        Error::User(UserError::UnknownVariant { ref variant, .. }) if variant == "ghost"
    ));
}

#[tokio::test]
async fn test_legacy_user_document() {
    let (gateway, store) = gateway_with_store().await;
    store
        .insert(
            USERS,
            document(json!({
                "username": "old",
                "hash": "x",
                "type": "pleb",
                "email": "o@x.com",
            })),
        )
        .await
        .unwrap();

    let user = gateway.fetch_user("old").await.unwrap().unwrap();
    assert_eq!(user.kind(), UserKind::Viewer);
    assert_eq!(user.password_hash(), "x");
}

#[tokio::test]
async fn test_one_document_per_registration() {
    let (gateway, store) = gateway_with_store().await;
    register_artist(&gateway, "a").await;
    gateway.register_viewer("b", "p", "").await.unwrap();
    let _ = gateway.register_viewer("b", "p", "").await;

    assert_eq!(store.count(USERS).await, 2);
}

#[tokio::test]
async fn test_existing_duplicates_refuse_to_open() {
    let store = std::sync::Arc::new(InMemory::new());
    for _ in 0..2 {
        store
            .insert(
                USERS,
                document(json!({
                    "username": "twin",
                    "passwordHash": "x",
                    "variant": "viewer",
                    "email": "",
                })),
            )
            .await
            .unwrap();
    }

    let result =
        comicstore::Gateway::open(store, comicstore::GatewayConfig::for_tests()).await;
    let Err(err) = result else {
        panic!("expected duplicate usernames to be rejected");
    };
    assert!(err.is_store_error());
}
