use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::newsletters::model::{CreateNewsletterDto, Newsletter, UpdateNewsletterDto};
use crate::modules::newsletters::service::NewsletterService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all newsletters
#[utoipa::path(
    get,
    path = "/api/newsletters",
    responses(
        (status = 200, description = "List of newsletters", body = Vec<Newsletter>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
#[instrument(skip(state))]
pub async fn get_newsletters(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Newsletter>>, AppError> {
    check_capability(&auth_user, Resource::Newsletters, Operation::List)?;

    let newsletters = NewsletterService::get_newsletters(&state.db).await?;
    Ok(Json(newsletters))
}

/// Get a newsletter by id
#[utoipa::path(
    get,
    path = "/api/newsletters/{id}",
    params(("id" = i32, Path, description = "Newsletter id")),
    responses(
        (status = 200, description = "Newsletter", body = Newsletter),
        (status = 404, description = "Newsletter not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
#[instrument(skip(state))]
pub async fn get_newsletter(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Newsletter>, AppError> {
    check_capability(&auth_user, Resource::Newsletters, Operation::Get)?;

    let newsletter = NewsletterService::get_newsletter_by_id(&state.db, id).await?;
    Ok(Json(newsletter))
}

/// Create a newsletter (admin or teacher); the caller becomes the author
#[utoipa::path(
    post,
    path = "/api/newsletters",
    request_body = CreateNewsletterDto,
    responses(
        (status = 201, description = "Newsletter created", body = Newsletter),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
#[instrument(skip(state, dto))]
pub async fn create_newsletter(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNewsletterDto>,
) -> Result<(StatusCode, Json<Newsletter>), AppError> {
    check_capability(&auth_user, Resource::Newsletters, Operation::Create)?;

    let newsletter =
        NewsletterService::create_newsletter(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(newsletter)))
}

/// Update a newsletter (author only; foreign rows answer 404)
#[utoipa::path(
    put,
    path = "/api/newsletters/{id}",
    params(("id" = i32, Path, description = "Newsletter id")),
    request_body = UpdateNewsletterDto,
    responses(
        (status = 200, description = "Updated newsletter", body = Newsletter),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Newsletter not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
#[instrument(skip(state, dto))]
pub async fn update_newsletter(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateNewsletterDto>,
) -> Result<Json<Newsletter>, AppError> {
    check_capability(&auth_user, Resource::Newsletters, Operation::Update)?;

    let newsletter =
        NewsletterService::update_newsletter(&state.db, id, auth_user.id(), dto).await?;
    Ok(Json(newsletter))
}

/// Delete a newsletter (admin only)
#[utoipa::path(
    delete,
    path = "/api/newsletters/{id}",
    params(("id" = i32, Path, description = "Newsletter id")),
    responses(
        (status = 200, description = "Newsletter deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Newsletter not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
#[instrument(skip(state))]
pub async fn delete_newsletter(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Newsletters, Operation::Delete)?;

    NewsletterService::delete_newsletter(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Newsletter deleted successfully".to_string(),
    }))
}
