//! Repository for the `revisions` table.
//!
//! Revisions are append-only. Appending and pruning happen on a connection
//! that already holds the document's row lock, so revision numbers for one
//! document are assigned strictly in sequence.

use folio_core::document::EditableFields;
use folio_core::revision::{next_revision_number, plan_prune};
use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::revision::Revision;
use crate::repositories::document_repo::DocumentRepo;

/// Column list for revisions queries.
const COLUMNS: &str =
    "id, document_id, revision_number, title, body, excerpt, author_id, created_at";

/// Provides append, prune, and read operations for document revisions.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a snapshot of `fields` and prune history down to `retention`.
    ///
    /// The caller must hold the document's row lock (see
    /// [`DocumentRepo::find_for_update`]) on `conn`. With `retention == 0`
    /// nothing is appended, every existing revision is removed, and `None` is
    /// returned.
    pub async fn record(
        conn: &mut PgConnection,
        document_id: DbId,
        fields: &EditableFields,
        author_id: Option<DbId>,
        retention: usize,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let mut numbers: Vec<i32> =
            sqlx::query_scalar("SELECT revision_number FROM revisions WHERE document_id = $1")
                .bind(document_id)
                .fetch_all(&mut *conn)
                .await?;

        if retention == 0 {
            let purged = Self::delete_numbers(&mut *conn, document_id, &numbers).await?;
            if purged > 0 {
                tracing::debug!(document_id, purged, "Revision history disabled, purged");
            }
            return Ok(None);
        }

        let revision_number = next_revision_number(&numbers);
        let query = format!(
            "INSERT INTO revisions
                (document_id, revision_number, title, body, excerpt, author_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let revision = sqlx::query_as::<_, Revision>(&query)
            .bind(document_id)
            .bind(revision_number)
            .bind(&fields.title)
            .bind(&fields.body)
            .bind(&fields.excerpt)
            .bind(author_id)
            .fetch_one(&mut *conn)
            .await?;

        numbers.push(revision_number);
        let doomed = plan_prune(&numbers, retention);
        let pruned = Self::delete_numbers(&mut *conn, document_id, &doomed).await?;
        if pruned > 0 {
            tracing::debug!(document_id, pruned, retention, "Pruned old revisions");
        }

        Ok(Some(revision))
    }

    /// Snapshot the document's current live fields in a transaction of its own.
    ///
    /// Returns `Err(RowNotFound)` if the document does not exist.
    pub async fn record_for_document(
        pool: &PgPool,
        document_id: DbId,
        author_id: Option<DbId>,
        retention: usize,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let document = DocumentRepo::find_for_update(&mut *tx, document_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let revision =
            Self::record(&mut *tx, document_id, &document.fields(), author_id, retention)
                .await?;
        tx.commit().await?;
        Ok(revision)
    }

    /// List revisions for a document, newest first.
    pub async fn list_by_document(
        pool: &PgPool,
        document_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE document_id = $1
             ORDER BY revision_number DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(document_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a revision by id, but only if it belongs to `document_id`.
    pub async fn find_for_document<'e, E>(
        executor: E,
        id: DbId,
        document_id: DbId,
    ) -> Result<Option<Revision>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM revisions WHERE id = $1 AND document_id = $2");
        sqlx::query_as::<_, Revision>(&query)
            .bind(id)
            .bind(document_id)
            .fetch_optional(executor)
            .await
    }

    /// The oldest retained revision of a document, if any.
    pub async fn find_oldest(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE document_id = $1
             ORDER BY revision_number ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(document_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of retained revisions for a document.
    pub async fn count_by_document(pool: &PgPool, document_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM revisions WHERE document_id = $1")
            .bind(document_id)
            .fetch_one(pool)
            .await
    }

    async fn delete_numbers(
        conn: &mut PgConnection,
        document_id: DbId,
        numbers: &[i32],
    ) -> Result<u64, sqlx::Error> {
        if numbers.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "DELETE FROM revisions WHERE document_id = $1 AND revision_number = ANY($2)",
        )
        .bind(document_id)
        .bind(numbers)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
