use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::documents::model::{CreateDocumentDto, Document, UpdateDocumentDto};
use crate::utils::errors::AppError;

const DOCUMENT_COLUMNS: &str = "id, title, description, file_url, file_type, file_size, \
                                is_public, category, uploaded_by_id, created_at, updated_at";

pub struct DocumentService;

impl DocumentService {
    #[instrument(skip(db))]
    pub async fn get_documents(db: &PgPool) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch documents")
        .map_err(AppError::database)?;

        Ok(documents)
    }

    #[instrument(skip(db))]
    pub async fn get_document_by_id(db: &PgPool, id: i32) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch document by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Document not found")))?;

        Ok(document)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_document(
        db: &PgPool,
        uploaded_by_id: i32,
        dto: CreateDocumentDto,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (title, description, file_url, file_type, file_size,
                                    is_public, category, uploaded_by_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE), $7, $8)
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.file_url)
        .bind(&dto.file_type)
        .bind(dto.file_size)
        .bind(dto.is_public)
        .bind(&dto.category)
        .bind(uploaded_by_id)
        .fetch_one(db)
        .await
        .context("Failed to create document")
        .map_err(AppError::database)?;

        Ok(document)
    }

    /// Scoped to the uploader: a non-uploader caller sees 404.
    #[instrument(skip(db, dto))]
    pub async fn update_document(
        db: &PgPool,
        id: i32,
        uploaded_by_id: i32,
        dto: UpdateDocumentDto,
    ) -> Result<Document, AppError> {
        let existing = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1 AND uploaded_by_id = $2"
        ))
        .bind(id)
        .bind(uploaded_by_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch document for update")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Document not found")))?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.or(existing.description);
        let file_url = dto.file_url.unwrap_or(existing.file_url);
        let file_type = dto.file_type.unwrap_or(existing.file_type);
        let file_size = dto.file_size.or(existing.file_size);
        let is_public = dto.is_public.unwrap_or(existing.is_public);
        let category = dto.category.or(existing.category);

        let document = sqlx::query_as::<_, Document>(&format!(
            "UPDATE documents
             SET title = $1, description = $2, file_url = $3, file_type = $4,
                 file_size = $5, is_public = $6, category = $7, updated_at = NOW()
             WHERE id = $8 AND uploaded_by_id = $9
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&title)
        .bind(&description)
        .bind(&file_url)
        .bind(&file_type)
        .bind(file_size)
        .bind(is_public)
        .bind(&category)
        .bind(id)
        .bind(uploaded_by_id)
        .fetch_one(db)
        .await
        .context("Failed to update document")
        .map_err(AppError::database)?;

        Ok(document)
    }

    #[instrument(skip(db))]
    pub async fn delete_document(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete document")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Document not found")));
        }

        Ok(())
    }
}
