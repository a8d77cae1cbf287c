//! Repository for the `documents` table.
//!
//! Every save records a revision in the same transaction, and restores take a
//! pre-restore snapshot before overwriting the live fields.

use folio_core::document::EditableFields;
use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::models::revision::RestoreOutcome;
use crate::repositories::revision_repo::RevisionRepo;

/// Column list for documents queries.
const COLUMNS: &str = "id, entity_type, title, body, excerpt, created_at, updated_at";

/// Provides CRUD and restore operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Create a document and its first revision.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDocument,
        retention: usize,
    ) -> Result<Document, sqlx::Error> {
        let fields = input.fields();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO documents (entity_type, title, body, excerpt)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let document = sqlx::query_as::<_, Document>(&query)
            .bind(&input.entity_type)
            .bind(&fields.title)
            .bind(&fields.body)
            .bind(&fields.excerpt)
            .fetch_one(&mut *tx)
            .await?;

        RevisionRepo::record(&mut *tx, document.id, &fields, input.author_id, retention).await?;

        tx.commit().await?;
        Ok(document)
    }

    /// Find a document by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a document and lock its row until the surrounding transaction ends.
    ///
    /// Concurrent saves and restores of the same document serialize here.
    pub async fn find_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List documents with an optional entity type filter, most recently
    /// updated first.
    pub async fn list(
        pool: &PgPool,
        entity_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE ($1::TEXT IS NULL OR entity_type = $1)
             ORDER BY updated_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(entity_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Save new field values and record a revision of the saved state.
    ///
    /// Returns `None` if the document does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDocument,
        retention: usize,
    ) -> Result<Option<Document>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(current) = Self::find_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };

        let fields = input.apply(&current.fields());
        let document = Self::write_fields(&mut *tx, id, &fields).await?;
        RevisionRepo::record(&mut *tx, id, &fields, input.author_id, retention).await?;

        tx.commit().await?;
        Ok(Some(document))
    }

    /// Delete a document. Its revisions cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a revision's fields onto the live document.
    ///
    /// Inside one transaction: lock the document, verify the revision belongs
    /// to it, snapshot the current live state as a new revision, then
    /// overwrite the live fields. Restoring that snapshot afterwards undoes
    /// the restore. Returns `None` if the document is missing or the revision
    /// is missing or owned by another document.
    pub async fn restore_revision(
        pool: &PgPool,
        document_id: DbId,
        revision_id: DbId,
        author_id: Option<DbId>,
        retention: usize,
    ) -> Result<Option<RestoreOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::find_for_update(&mut *tx, document_id).await? else {
            return Ok(None);
        };
        let Some(target) =
            RevisionRepo::find_for_document(&mut *tx, revision_id, document_id).await?
        else {
            return Ok(None);
        };

        let snapshot =
            RevisionRepo::record(&mut *tx, document_id, &current.fields(), author_id, retention)
                .await?;
        let document = Self::write_fields(&mut *tx, document_id, &target.fields()).await?;

        tx.commit().await?;

        Ok(Some(RestoreOutcome {
            document,
            snapshot,
            restored_from: target,
        }))
    }

    async fn write_fields(
        conn: &mut PgConnection,
        id: DbId,
        fields: &EditableFields,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET title = $2, body = $3, excerpt = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.body)
            .bind(&fields.excerpt)
            .fetch_one(conn)
            .await
    }
}
