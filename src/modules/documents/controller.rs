use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::documents::model::{CreateDocumentDto, Document, UpdateDocumentDto};
use crate::modules::documents::service::DocumentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all documents
#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "List of documents", body = Vec<Document>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn get_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Document>>, AppError> {
    check_capability(&auth_user, Resource::Documents, Operation::List)?;

    let documents = DocumentService::get_documents(&state.db).await?;
    Ok(Json(documents))
}

/// Get a document by id
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document", body = Document),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Document>, AppError> {
    check_capability(&auth_user, Resource::Documents, Operation::Get)?;

    let document = DocumentService::get_document_by_id(&state.db, id).await?;
    Ok(Json(document))
}

/// Create a document record (admin or teacher); the caller becomes the uploader
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentDto,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state, dto))]
pub async fn create_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDocumentDto>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    check_capability(&auth_user, Resource::Documents, Operation::Create)?;

    let document = DocumentService::create_document(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Update a document (uploader only; foreign rows answer 404)
#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    params(("id" = i32, Path, description = "Document id")),
    request_body = UpdateDocumentDto,
    responses(
        (status = 200, description = "Updated document", body = Document),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state, dto))]
pub async fn update_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateDocumentDto>,
) -> Result<Json<Document>, AppError> {
    check_capability(&auth_user, Resource::Documents, Operation::Update)?;

    let document =
        DocumentService::update_document(&state.db, id, auth_user.id(), dto).await?;
    Ok(Json(document))
}

/// Delete a document (admin only)
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Documents, Operation::Delete)?;

    DocumentService::delete_document(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Document deleted successfully".to_string(),
    }))
}
