use chrono::{TimeZone, Utc};
use nj_catalog::MemoryCatalog;
use nj_core::{Article, Catalog};
use nj_journal::{ErrorKind, SessionRegistry, Status};
use std::sync::Arc;

fn article(id: u64) -> Article {
    Article::new(
        id,
        "The Daily",
        format!("Author {}", id),
        format!("Title {}", id),
        format!("https://example.com/{}", id),
        "One two three four five six seven eight nine ten.",
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    )
    .unwrap()
}

async fn seeded_registry(ids: &[u64]) -> (SessionRegistry, Arc<MemoryCatalog>) {
    let catalog = Arc::new(MemoryCatalog::new());
    catalog
        .seed(ids.iter().map(|&id| article(id)).collect())
        .await
        .unwrap();
    (SessionRegistry::new(catalog.clone()), catalog)
}

#[tokio::test]
async fn removal_keeps_the_cursor_on_the_next_article() {
    let (registry, _catalog) = seeded_registry(&[1, 2, 3]).await;
    let service = registry.open("reader").await.unwrap();
    for id in [1, 2, 3] {
        assert_eq!(service.add_article_by_id(id).await.status, Status::Success);
    }

    // journal = [A, C] afterwards, cursor still 1, numbers contiguous.
    assert_eq!(
        service.remove_by_article_number(2).await.status,
        Status::Success
    );
    let listing = service.list().await;
    let ids: Vec<u64> = listing.entries.iter().map(|e| e.article.id).collect();
    assert_eq!(ids, vec![1, 3]);
    let numbers: Vec<usize> = listing.entries.iter().map(|e| e.article_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(listing.cursor, 1);
}

#[tokio::test]
async fn read_rewind_read_entire_walk() {
    let (registry, catalog) = seeded_registry(&[1, 2, 3]).await;
    let service = registry.open("reader").await.unwrap();
    for id in [1, 2, 3] {
        service.add_article_by_id(id).await;
    }

    let first = service.read_current().await;
    assert_eq!(first.article.as_ref().unwrap().id, 1);
    assert_eq!(first.cursor, Some(2));

    let second = service.read_current().await;
    assert_eq!(second.article.as_ref().unwrap().id, 2);
    assert_eq!(second.cursor, Some(3));

    service.rewind().await;

    let full = service.read_entire_journal().await;
    assert_eq!(full.status, Status::Success);
    let ids: Vec<u64> = full.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(full.cursor, Some(4));

    // Two singles plus one full pass.
    assert_eq!(catalog.read_count(1).await.unwrap(), 2);
    assert_eq!(catalog.read_count(2).await.unwrap(), 2);
    assert_eq!(catalog.read_count(3).await.unwrap(), 1);

    let exhausted = service.read_current().await;
    assert_eq!(exhausted.error_kind, Some(ErrorKind::JournalExhausted));

    // Policy split: a full read restarts, a rest-read has nothing left.
    let rest = service.read_rest_of_journal().await;
    assert_eq!(rest.error_kind, Some(ErrorKind::JournalExhausted));
    let restart = service.read_entire_journal().await;
    assert_eq!(restart.status, Status::Success);
    assert_eq!(restart.articles.len(), 3);
}

#[tokio::test]
async fn move_to_position_renumbers_without_losing_entries() {
    let (registry, _catalog) = seeded_registry(&[1, 2]).await;
    let service = registry.open("reader").await.unwrap();
    service.add_article_by_id(1).await;
    service.add_article_by_id(2).await;

    assert_eq!(service.move_to_position(2, 1).await.status, Status::Success);
    let listing = service.list().await;
    let ids: Vec<u64> = listing.entries.iter().map(|e| e.article.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(listing.entries[0].article_number, 1);
    assert_eq!(listing.entries[1].article_number, 2);
}

#[tokio::test]
async fn soft_deleted_articles_cannot_enter_a_journal() {
    let (registry, catalog) = seeded_registry(&[1, 2]).await;
    let service = registry.open("reader").await.unwrap();

    catalog.soft_delete(1).await.unwrap();
    let response = service.add_article_by_id(1).await;
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.error_kind, Some(ErrorKind::NotFound));

    // The rest of the catalog is still reachable.
    assert_eq!(service.add_article_by_id(2).await.status, Status::Success);
}

#[tokio::test]
async fn a_journal_survives_catalog_soft_deletes_but_reads_report_partial_failure() {
    let (registry, catalog) = seeded_registry(&[1]).await;
    let service = registry.open("reader").await.unwrap();
    service.add_article_by_id(1).await;

    // The snapshot is already in the journal; deleting the catalog row
    // afterwards only breaks the read-count write-through.
    catalog.soft_delete(1).await.unwrap();

    let read = service.read_current().await;
    assert_eq!(read.status, Status::Error);
    assert_eq!(read.error_kind, Some(ErrorKind::PartialFailure));
    // The read itself happened: the cursor is past the entry.
    assert_eq!(read.cursor, Some(2));
}

#[tokio::test]
async fn two_sessions_never_share_read_state() {
    let (registry, catalog) = seeded_registry(&[1, 2]).await;
    let alice = registry.open("alice").await.unwrap();
    let bob = registry.open("bob").await.unwrap();

    alice.add_article_by_id(1).await;
    bob.add_article_by_id(1).await;
    bob.add_article_by_id(2).await;

    alice.read_current().await;
    assert_eq!(alice.list().await.cursor, 2);
    assert_eq!(bob.list().await.cursor, 1);

    // Read counts aggregate across sessions in the shared catalog.
    bob.read_current().await;
    assert_eq!(catalog.read_count(1).await.unwrap(), 2);
}
