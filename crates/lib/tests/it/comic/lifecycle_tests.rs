use comicstore::{
    Error,
    comic::{ComicError, canonical_uri},
    constants::COMICS,
    store::{DocumentStore, Filter},
};
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn test_create_and_fetch() {
    let gateway = test_gateway().await;
    register_artist(&gateway, "alice").await;

    let created = gateway
        .create_comic("My First Comic", "alice", "A story")
        .await
        .unwrap();
    assert_eq!(created.uri(), "my-first-comic");
    assert_eq!(created.canonical_uri(), "my-first-comic");

    let fetched = gateway
        .fetch_comic("alice", "my-first-comic")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name(), "My First Comic");
    assert_eq!(fetched.description(), "A story");
    assert_eq!(fetched.page_count(), 0);
    assert!(fetched.panel_map().is_empty());
}

#[tokio::test]
async fn test_fetch_with_any_uri_formatting() {
    let gateway = test_gateway().await;
    gateway.create_comic("Night Shift", "alice", "").await.unwrap();

    for uri in ["night-shift", "Night-Shift", " night - shift ", "-night--shift-"] {
        let comic = gateway.fetch_comic("alice", uri).await.unwrap();
        assert!(comic.is_some(), "{uri:?} should find the comic");
    }
}

#[tokio::test]
async fn test_fetch_is_scoped_to_creator() {
    let gateway = test_gateway().await;
    gateway.create_comic("Strip", "alice", "").await.unwrap();

    assert!(gateway.fetch_comic("bob", "strip").await.unwrap().is_none());
    assert!(gateway.fetch_comic("alice", "other").await.unwrap().is_none());
}

#[tokio::test]
async fn test_same_name_per_creator_is_rejected() {
    let gateway = test_gateway().await;
    gateway.create_comic("Strip", "alice", "").await.unwrap();

    let err = gateway.create_comic("strip", "alice", "").await.unwrap_err();
    assert!(err.is_conflict());
    assert!(matches!(
        err,
        Error::Comic(ComicError::ComicAlreadyExists { .. })
    ));

    // A different creator may reuse the name
    gateway.create_comic("Strip", "bob", "").await.unwrap();
}

#[test]
fn test_canonicalization_is_idempotent() {
    for uri in ["My-Comic", " a - b ", "---", "x--y", "Ünïcode-Name"] {
        let once = canonical_uri(uri);
        assert_eq!(canonical_uri(&once), once, "not idempotent for {uri:?}");
    }
}

#[tokio::test]
async fn test_legacy_comic_document_is_readable_and_writable() {
    let (gateway, store) = gateway_with_store().await;
    store
        .insert(
            COMICS,
            document(json!({
                "uri": "old-strip",
                "canonicalUri": "old-strip",
                "title": "Old Strip",
                "creator": "alice",
                "adminlist": ["alice"],
                "editlist": ["alice"],
                "pages": [[0, 1]],
                "panel_map": ["a.png", "b.png"],
            })),
        )
        .await
        .unwrap();

    let comic = gateway.fetch_comic("alice", "old-strip").await.unwrap().unwrap();
    assert_eq!(comic.page_panels(1).unwrap(), ["a.png", "b.png"]);
    assert!(comic.viewlist().is_empty());

    // The first write adds the current field names next to the old ones
    let id = gateway
        .insert_panel("alice", "old-strip", 1, "c.png")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(id.0, 2);

    let comic = gateway.fetch_comic("alice", "old-strip").await.unwrap().unwrap();
    assert_eq!(comic.page_panels(1).unwrap(), ["a.png", "b.png", "c.png"]);
}

#[tokio::test]
async fn test_comic_keyed_by_urisan_is_found_and_migrated() {
    let (gateway, store) = gateway_with_store().await;
    store
        .insert(
            COMICS,
            document(json!({
                "uri": "old-strip",
                "urisan": "old-strip",
                "title": "Old Strip",
                "creator": "alice",
                "adminlist": ["alice"],
                "editlist": ["alice"],
                "pages": [[0]],
                "panel_map": ["a.png"],
            })),
        )
        .await
        .unwrap();

    let comic = gateway
        .fetch_comic("alice", "Old-Strip")
        .await
        .unwrap()
        .expect("document keyed by urisan should be found");
    assert_eq!(comic.canonical_uri(), "old-strip");
    assert_eq!(comic.page_panels(1).unwrap(), ["a.png"]);

    let err = gateway.create_comic("Old Strip", "alice", "").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Comic(ComicError::ComicAlreadyExists { .. })
    ));

    let id = gateway
        .insert_panel("alice", "old-strip", 1, "b.png")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(id.0, 1);

    let stored = store
        .find_one(
            COMICS,
            &Filter::new()
                .field("canonicalUri", "old-strip")
                .field("creator", "alice"),
        )
        .await
        .unwrap()
        .expect("first update adds the current key");
    assert_eq!(stored.get("revision"), Some(&json!(1)));

    let comic = gateway.fetch_comic("alice", "old-strip").await.unwrap().unwrap();
    assert_eq!(comic.page_panels(1).unwrap(), ["a.png", "b.png"]);
    assert_eq!(store.count(COMICS).await, 1);
}

#[tokio::test]
async fn test_dangling_panel_is_corrupt() {
    let (gateway, store) = gateway_with_store().await;
    store
        .insert(
            COMICS,
            document(json!({
                "uri": "bad",
                "canonicalUri": "bad",
                "title": "Bad",
                "creator": "alice",
                "pages": [[3]],
                "panelMap": ["a.png"],
                "revision": 1,
            })),
        )
        .await
        .unwrap();

    let err = gateway.fetch_comic("alice", "bad").await.unwrap_err();
    assert!(err.is_corrupt_record());
}

#[tokio::test]
async fn test_missing_comic_operations_return_none() {
    let gateway = test_gateway().await;

    assert!(gateway.add_page("alice", "none").await.unwrap().is_none());
    assert!(
        gateway
            .insert_panel("alice", "none", 1, "a.png")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        gateway
            .grant_access("alice", "none", comicstore::Access::View, "bob")
            .await
            .unwrap()
            .is_none()
    );
}
