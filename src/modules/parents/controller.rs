use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::parents::model::{CreateParentDto, Parent, UpdateParentDto};
use crate::modules::parents::service::ParentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all parent profiles (admin only)
#[utoipa::path(
    get,
    path = "/api/parents",
    responses(
        (status = 200, description = "List of parents", body = Vec<Parent>),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parents(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Parent>>, AppError> {
    check_capability(&auth_user, Resource::Parents, Operation::List)?;

    let parents = ParentService::get_parents(&state.db).await?;
    Ok(Json(parents))
}

/// Get a parent profile by id
#[utoipa::path(
    get,
    path = "/api/parents/{id}",
    params(("id" = i32, Path, description = "Parent id")),
    responses(
        (status = 200, description = "Parent", body = Parent),
        (status = 404, description = "Parent not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Parent>, AppError> {
    check_capability(&auth_user, Resource::Parents, Operation::Get)?;

    let parent = ParentService::get_parent_by_id(&state.db, id).await?;
    Ok(Json(parent))
}

/// Create a parent profile (admin only)
#[utoipa::path(
    post,
    path = "/api/parents",
    request_body = CreateParentDto,
    responses(
        (status = 201, description = "Parent profile created", body = Parent),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 409, description = "User already has a parent profile", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn create_parent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateParentDto>,
) -> Result<(StatusCode, Json<Parent>), AppError> {
    check_capability(&auth_user, Resource::Parents, Operation::Create)?;

    let parent = ParentService::create_parent(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(parent)))
}

/// Update a parent profile
#[utoipa::path(
    put,
    path = "/api/parents/{id}",
    params(("id" = i32, Path, description = "Parent id")),
    request_body = UpdateParentDto,
    responses(
        (status = 200, description = "Updated parent", body = Parent),
        (status = 404, description = "Parent not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn update_parent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateParentDto>,
) -> Result<Json<Parent>, AppError> {
    check_capability(&auth_user, Resource::Parents, Operation::Update)?;

    let parent = ParentService::update_parent(&state.db, id, dto).await?;
    Ok(Json(parent))
}

/// Delete a parent profile (admin only)
#[utoipa::path(
    delete,
    path = "/api/parents/{id}",
    params(("id" = i32, Path, description = "Parent id")),
    responses(
        (status = 200, description = "Parent deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Parent not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn delete_parent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Parents, Operation::Delete)?;

    ParentService::delete_parent(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Parent deleted successfully".to_string(),
    }))
}
