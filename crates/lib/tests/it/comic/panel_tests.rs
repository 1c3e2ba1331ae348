use comicstore::{Error, PanelId, comic::ComicError};

use crate::helpers::*;

#[tokio::test]
async fn test_panel_ids_increase_across_pages() {
    let gateway = test_gateway().await;
    comic_with_pages(&gateway, "alice", "Strip", 2).await;

    let mut ids = Vec::new();
    for (page, locator) in [(1, "a.png"), (2, "b.png"), (1, "c.png"), (2, "d.png")] {
        let id = gateway
            .insert_panel("alice", "strip", page, locator)
            .await
            .unwrap()
            .unwrap();
        ids.push(id);
    }
    assert_eq!(ids, [PanelId(0), PanelId(1), PanelId(2), PanelId(3)]);

    let comic = gateway.fetch_comic("alice", "strip").await.unwrap().unwrap();
    assert_eq!(comic.panel_map(), ["a.png", "b.png", "c.png", "d.png"]);
    assert_eq!(comic.pages(), [vec![PanelId(0), PanelId(2)], vec![PanelId(1), PanelId(3)]]);
    assert_eq!(comic.page_panels(1).unwrap(), ["a.png", "c.png"]);
    assert_eq!(comic.page_panels(2).unwrap(), ["b.png", "d.png"]);
}

#[tokio::test]
async fn test_panel_map_survives_fetch() {
    let gateway = test_gateway().await;
    comic_with_pages(&gateway, "alice", "Strip", 1).await;
    let id = gateway
        .insert_panel("alice", "strip", 1, "img/1.png")
        .await
        .unwrap()
        .unwrap();

    let comic = gateway.fetch_comic("alice", "strip").await.unwrap().unwrap();
    assert_eq!(comic.panel(id), Some("img/1.png"));
}

#[tokio::test]
async fn test_add_page_numbers_from_one() {
    let gateway = test_gateway().await;
    gateway.create_comic("Strip", "alice", "").await.unwrap();

    assert_eq!(gateway.add_page("alice", "strip").await.unwrap(), Some(1));
    assert_eq!(gateway.add_page("alice", "strip").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_page_zero_rejected_without_io() {
    let (gateway, spy) = spy_gateway().await;
    comic_with_pages(&gateway, "alice", "Strip", 1).await;
    spy.reset();

    let err = gateway
        .insert_panel("alice", "strip", 0, "a.png")
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(matches!(
        err,
        Error::Comic(ComicError::InvalidPageNumber { page_number: 0 })
    ));
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_page_past_end_rejected_without_write() {
    let (gateway, spy) = spy_gateway().await;
    comic_with_pages(&gateway, "alice", "Strip", 2).await;
    spy.reset();

    let err = gateway
        .insert_panel("alice", "strip", 3, "a.png")
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(matches!(
        err,
        Error::Comic(ComicError::PageNotFound {
            page_number: 3,
            page_count: 2
        })
    ));
    assert_eq!(spy.updates(), 0);

    let comic = gateway.fetch_comic("alice", "strip").await.unwrap().unwrap();
    assert!(comic.panel_map().is_empty());
}

#[tokio::test]
async fn test_no_pages_means_no_panels() {
    let gateway = test_gateway().await;
    gateway.create_comic("Strip", "alice", "").await.unwrap();

    let err = gateway
        .insert_panel("alice", "strip", 1, "a.png")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Comic(ComicError::PageNotFound { page_count: 0, .. })
    ));
}
