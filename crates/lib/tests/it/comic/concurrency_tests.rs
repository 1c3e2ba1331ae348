use std::collections::BTreeSet;

use comicstore::{
    Error, PanelId,
    comic::{Comic, ComicError, ComicRecord},
    constants::COMICS,
    store::{DocumentStore, Filter},
};
use serde_json::json;

use crate::helpers::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_get_distinct_ids() {
    const WRITERS: usize = 16;

    let gateway = test_gateway().await;
    comic_with_pages(&gateway, "alice", "Strip", 2).await;

    let mut handles = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let gateway = gateway.clone();
        handles.push(tokio::spawn(async move {
            gateway
                .insert_panel("alice", "strip", i % 2 + 1, &format!("{i}.png"))
                .await
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap().unwrap();
        assert!(ids.insert(id), "panel id {id} handed out twice");
    }
    let expected: BTreeSet<_> = (0..WRITERS).map(PanelId).collect();
    assert_eq!(ids, expected);

    let comic = gateway.fetch_comic("alice", "strip").await.unwrap().unwrap();
    assert_eq!(comic.panel_map().len(), WRITERS);
    let placed: usize = comic.pages().iter().map(Vec::len).sum();
    assert_eq!(placed, WRITERS);
    for (id, locator) in comic.panel_map().iter().enumerate() {
        let page = comic
            .pages()
            .iter()
            .position(|page| page.contains(&PanelId(id)))
            .expect("every panel is on a page");
        let writer: usize = locator.trim_end_matches(".png").parse().unwrap();
        assert_eq!(page, writer % 2);
    }
}

#[tokio::test]
async fn test_interleaved_writer_is_retried() {
    let (gateway, spy) = spy_gateway().await;
    comic_with_pages(&gateway, "alice", "Strip", 1).await;
    spy.interfere_with_next_updates(3);

    let id = gateway
        .insert_panel("alice", "strip", 1, "a.png")
        .await
        .unwrap();
    assert_eq!(id, Some(PanelId(0)));

    let comic = gateway.fetch_comic("alice", "strip").await.unwrap().unwrap();
    assert_eq!(comic.page_panels(1).unwrap(), ["a.png"]);
}

#[tokio::test]
async fn test_persistent_contention_is_a_conflict() {
    use std::sync::Arc;

    use comicstore::{Gateway, GatewayConfig, store::SpyStore};

    let spy = Arc::new(SpyStore::new());
    let config = GatewayConfig {
        max_update_retries: 3,
        ..GatewayConfig::for_tests()
    };
    let gateway = Gateway::open(spy.clone(), config).await.unwrap();
    comic_with_pages(&gateway, "alice", "Strip", 1).await;
    spy.interfere_with_next_updates(u32::MAX);
    spy.reset();

    let err = gateway
        .insert_panel("alice", "strip", 1, "a.png")
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(matches!(
        err,
        Error::Comic(ComicError::UpdateConflict { attempts: 3, .. })
    ));
    assert_eq!(spy.updates(), 3);
}

/// Store a comic with one page, written without a revision field.
async fn unrevised_comic(spy: &comicstore::store::SpyStore) {
    let mut comic = Comic::new("Old", "alice", "");
    comic.add_page();
    let mut document = ComicRecord::new(&comic, 0).to_document().unwrap();
    document.remove("revision");
    spy.inner().insert(COMICS, document).await.unwrap();
}

#[tokio::test]
async fn test_competing_write_on_unrevised_comic_is_kept() {
    let (gateway, spy) = spy_gateway().await;
    unrevised_comic(&spy).await;
    spy.stage_competing_write(
        Filter::new().field("canonicalUri", "old"),
        document(json!({
            "pages": [[0]],
            "panelMap": ["other.png"],
            "revision": 1,
        })),
    );
    spy.reset();

    let id = gateway
        .insert_panel("alice", "old", 1, "mine.png")
        .await
        .unwrap();
    assert_eq!(id, Some(PanelId(1)));
    assert_eq!(spy.updates(), 2);

    let comic = gateway.fetch_comic("alice", "old").await.unwrap().unwrap();
    assert_eq!(comic.panel_map(), ["other.png", "mine.png"]);
    assert_eq!(comic.page_panels(1).unwrap(), ["other.png", "mine.png"]);
}

#[tokio::test]
async fn test_revisionless_competing_write_is_detected() {
    let (gateway, spy) = spy_gateway().await;
    unrevised_comic(&spy).await;
    // A writer that does not know about revisions
    spy.stage_competing_write(
        Filter::new().field("canonicalUri", "old"),
        document(json!({
            "pages": [[0]],
            "panelMap": ["other.png"],
        })),
    );

    let id = gateway
        .insert_panel("alice", "old", 1, "mine.png")
        .await
        .unwrap();
    assert_eq!(id, Some(PanelId(1)));

    let comic = gateway.fetch_comic("alice", "old").await.unwrap().unwrap();
    assert_eq!(comic.panel_map(), ["other.png", "mine.png"]);
}
