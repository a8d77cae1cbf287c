//! Integration tests for revision recording, retention, and lookup.
//!
//! Exercises `DocumentRepo` and `RevisionRepo` against a real database:
//! - Creating a document records revision #1
//! - Each save appends the next revision number
//! - Retention keeps at most R revisions, always the newest
//! - Retention 0 records nothing and purges existing history
//! - `list_by_document` returns newest first and honours limit and offset
//! - Concurrent saves get gapless, unique revision numbers
//! - `find_for_document` refuses revisions of another document
//! - Deleting a document cascades to its revisions

use assert_matches::assert_matches;
use folio_db::models::document::{CreateDocument, UpdateDocument};
use folio_db::repositories::{DocumentRepo, RevisionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const RETAIN: usize = 25;

fn new_document(title: &str, body: &str) -> CreateDocument {
    CreateDocument {
        entity_type: "post".to_string(),
        title: title.to_string(),
        body: Some(body.to_string()),
        excerpt: None,
        author_id: Some(7),
    }
}

fn body_edit(body: &str) -> UpdateDocument {
    UpdateDocument {
        body: Some(body.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: create records revision #1
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_records_first_revision(pool: PgPool) {
    let doc = DocumentRepo::create(&pool, &new_document("Hello", "The quick fox"), RETAIN)
        .await
        .unwrap();

    let revisions = RevisionRepo::list_by_document(&pool, doc.id, 50, 0).await.unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].revision_number, 1);
    assert_eq!(revisions[0].title, "Hello");
    assert_eq!(revisions[0].body, "The quick fox");
    assert_eq!(revisions[0].excerpt, "");
    assert_eq!(revisions[0].author_id, Some(7));
}

// ---------------------------------------------------------------------------
// Test: saves append in sequence, list is newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_saves_append_newest_first(pool: PgPool) {
    let doc = DocumentRepo::create(&pool, &new_document("Doc", "one"), RETAIN)
        .await
        .unwrap();
    DocumentRepo::update(&pool, doc.id, &body_edit("two"), RETAIN)
        .await
        .unwrap()
        .unwrap();
    let saved = DocumentRepo::update(&pool, doc.id, &body_edit("three"), RETAIN)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.body, "three");
    assert_eq!(saved.title, "Doc", "omitted fields keep their value");

    let revisions = RevisionRepo::list_by_document(&pool, doc.id, 50, 0).await.unwrap();
    let numbers: Vec<i32> = revisions.iter().map(|r| r.revision_number).collect();
    assert_eq!(numbers, vec![3, 2, 1]);
    assert_eq!(revisions[0].body, "three");
    assert_eq!(revisions[2].body, "one");

    let limited = RevisionRepo::list_by_document(&pool, doc.id, 2, 0).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].revision_number, 3);

    let skipped = RevisionRepo::list_by_document(&pool, doc.id, 2, 2).await.unwrap();
    let numbers: Vec<i32> = skipped.iter().map(|r| r.revision_number).collect();
    assert_eq!(numbers, vec![1]);
}

// ---------------------------------------------------------------------------
// Test: concurrent saves serialize on the document row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_saves_number_contiguously(pool: PgPool) {
    const WRITERS: usize = 8;

    let doc = DocumentRepo::create(&pool, &new_document("Doc", "v0"), RETAIN)
        .await
        .unwrap();
    let id = doc.id;

    let handles: Vec<_> = (1..=WRITERS)
        .map(|n| {
            let pool = pool.clone();
            let edit = body_edit(&format!("v{n}"));
            tokio::spawn(async move { DocumentRepo::update(&pool, id, &edit, RETAIN).await })
        })
        .collect();

    for handle in handles {
        let saved = handle.await.unwrap();
        assert_matches!(saved, Ok(Some(_)), "every concurrent save must succeed");
    }

    let revisions = RevisionRepo::list_by_document(&pool, id, 50, 0).await.unwrap();
    let numbers: Vec<i32> = revisions.iter().map(|r| r.revision_number).collect();
    let expected: Vec<i32> = (1..=(WRITERS as i32 + 1)).rev().collect();
    assert_eq!(numbers, expected, "numbers must be gapless and unique");

    let live = DocumentRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(revisions[0].body, live.body, "newest revision matches the live body");
}

// ---------------------------------------------------------------------------
// Test: retention 2 with three saves keeps #2 and #3
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_retention_keeps_newest(pool: PgPool) {
    let doc = DocumentRepo::create(&pool, &new_document("Doc", "v1"), 2)
        .await
        .unwrap();
    DocumentRepo::update(&pool, doc.id, &body_edit("v2"), 2)
        .await
        .unwrap();
    DocumentRepo::update(&pool, doc.id, &body_edit("v3"), 2)
        .await
        .unwrap();

    let revisions = RevisionRepo::list_by_document(&pool, doc.id, 50, 0).await.unwrap();
    let numbers: Vec<i32> = revisions.iter().map(|r| r.revision_number).collect();
    assert_eq!(numbers, vec![3, 2]);

    let oldest = RevisionRepo::find_oldest(&pool, doc.id).await.unwrap().unwrap();
    assert_eq!(oldest.revision_number, 2);
    assert_eq!(oldest.body, "v2");
}

// ---------------------------------------------------------------------------
// Test: after N saves exactly min(N, R) revisions remain
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_retention_count_is_min_of_saves_and_limit(pool: PgPool) {
    let retain = 4;
    let doc = DocumentRepo::create(&pool, &new_document("Doc", "save 1"), retain)
        .await
        .unwrap();

    for n in 2..=7_usize {
        DocumentRepo::update(&pool, doc.id, &body_edit(&format!("save {n}")), retain)
            .await
            .unwrap();
        let count = RevisionRepo::count_by_document(&pool, doc.id).await.unwrap();
        assert_eq!(count as usize, n.min(retain), "after {n} saves");
    }

    // Numbers keep increasing even though early revisions were pruned.
    let newest = RevisionRepo::list_by_document(&pool, doc.id, 1, 0).await.unwrap();
    assert_eq!(newest[0].revision_number, 7);
}

// ---------------------------------------------------------------------------
// Test: retention 0 disables history and purges what exists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_retention_zero_purges(pool: PgPool) {
    let doc = DocumentRepo::create(&pool, &new_document("Doc", "v1"), RETAIN)
        .await
        .unwrap();
    DocumentRepo::update(&pool, doc.id, &body_edit("v2"), RETAIN)
        .await
        .unwrap();
    assert_eq!(RevisionRepo::count_by_document(&pool, doc.id).await.unwrap(), 2);

    let saved = DocumentRepo::update(&pool, doc.id, &body_edit("v3"), 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.body, "v3", "the save itself still happens");
    assert_eq!(RevisionRepo::count_by_document(&pool, doc.id).await.unwrap(), 0);

    let snapshot = RevisionRepo::record_for_document(&pool, doc.id, None, 0)
        .await
        .unwrap();
    assert!(snapshot.is_none());
}

// ---------------------------------------------------------------------------
// Test: explicit snapshot of live state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_for_document_snapshots_live(pool: PgPool) {
    let doc = DocumentRepo::create(&pool, &new_document("Doc", "live body"), RETAIN)
        .await
        .unwrap();

    let snapshot = RevisionRepo::record_for_document(&pool, doc.id, Some(3), RETAIN)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.revision_number, 2);
    assert_eq!(snapshot.body, "live body");
    assert_eq!(snapshot.author_id, Some(3));

    let missing = RevisionRepo::record_for_document(&pool, 999_999, None, RETAIN).await;
    assert_matches!(missing, Err(sqlx::Error::RowNotFound));
}

// ---------------------------------------------------------------------------
// Test: lookup is scoped to the owning document
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_for_document_rejects_other_document(pool: PgPool) {
    let a = DocumentRepo::create(&pool, &new_document("A", "alpha"), RETAIN)
        .await
        .unwrap();
    let b = DocumentRepo::create(&pool, &new_document("B", "beta"), RETAIN)
        .await
        .unwrap();
    let rev_a = RevisionRepo::list_by_document(&pool, a.id, 1, 0).await.unwrap()[0].clone();

    let own = RevisionRepo::find_for_document(&pool, rev_a.id, a.id)
        .await
        .unwrap();
    assert!(own.is_some());

    let foreign = RevisionRepo::find_for_document(&pool, rev_a.id, b.id)
        .await
        .unwrap();
    assert!(foreign.is_none(), "revision of A must not resolve under B");
}

// ---------------------------------------------------------------------------
// Test: deleting a document removes its revisions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades(pool: PgPool) {
    let doc = DocumentRepo::create(&pool, &new_document("Doc", "body"), RETAIN)
        .await
        .unwrap();

    assert!(DocumentRepo::delete(&pool, doc.id).await.unwrap());
    assert!(!DocumentRepo::delete(&pool, doc.id).await.unwrap());
    assert!(DocumentRepo::find_by_id(&pool, doc.id).await.unwrap().is_none());
    assert_eq!(RevisionRepo::count_by_document(&pool, doc.id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: list filters by entity type
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_entity_type(pool: PgPool) {
    DocumentRepo::create(&pool, &new_document("Post", "p"), RETAIN)
        .await
        .unwrap();
    let page = CreateDocument {
        entity_type: "page".to_string(),
        ..new_document("Page", "q")
    };
    DocumentRepo::create(&pool, &page, RETAIN).await.unwrap();

    let all = DocumentRepo::list(&pool, None, 20, 0).await.unwrap();
    assert_eq!(all.len(), 2);

    let pages = DocumentRepo::list(&pool, Some("page"), 20, 0).await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "Page");
}
