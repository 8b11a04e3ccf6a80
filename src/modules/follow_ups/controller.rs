use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::follow_ups::model::{CreateFollowUpDto, FollowUp, UpdateFollowUpDto};
use crate::modules::follow_ups::service::FollowUpService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all follow-ups (admin or teacher)
#[utoipa::path(
    get,
    path = "/api/followUps",
    responses(
        (status = 200, description = "List of follow-ups", body = Vec<FollowUp>),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Follow-ups"
)]
#[instrument(skip(state))]
pub async fn get_follow_ups(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<FollowUp>>, AppError> {
    check_capability(&auth_user, Resource::FollowUps, Operation::List)?;

    let follow_ups = FollowUpService::get_follow_ups(&state.db).await?;
    Ok(Json(follow_ups))
}

/// Get a follow-up by id
#[utoipa::path(
    get,
    path = "/api/followUps/{id}",
    params(("id" = i32, Path, description = "Follow-up id")),
    responses(
        (status = 200, description = "Follow-up", body = FollowUp),
        (status = 404, description = "Follow-up not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Follow-ups"
)]
#[instrument(skip(state))]
pub async fn get_follow_up(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<FollowUp>, AppError> {
    check_capability(&auth_user, Resource::FollowUps, Operation::Get)?;

    let follow_up = FollowUpService::get_follow_up_by_id(&state.db, id).await?;
    Ok(Json(follow_up))
}

/// Record a follow-up (admin or teacher); the caller is recorded as observer
#[utoipa::path(
    post,
    path = "/api/followUps",
    request_body = CreateFollowUpDto,
    responses(
        (status = 201, description = "Follow-up created", body = FollowUp),
        (status = 400, description = "Validation or reference error", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Follow-ups"
)]
#[instrument(skip(state, dto))]
pub async fn create_follow_up(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFollowUpDto>,
) -> Result<(StatusCode, Json<FollowUp>), AppError> {
    check_capability(&auth_user, Resource::FollowUps, Operation::Create)?;

    let follow_up = FollowUpService::create_follow_up(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(follow_up)))
}

/// Update a follow-up (recorder only; foreign rows answer 404)
#[utoipa::path(
    put,
    path = "/api/followUps/{id}",
    params(("id" = i32, Path, description = "Follow-up id")),
    request_body = UpdateFollowUpDto,
    responses(
        (status = 200, description = "Updated follow-up", body = FollowUp),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Follow-up not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Follow-ups"
)]
#[instrument(skip(state, dto))]
pub async fn update_follow_up(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateFollowUpDto>,
) -> Result<Json<FollowUp>, AppError> {
    check_capability(&auth_user, Resource::FollowUps, Operation::Update)?;

    let follow_up =
        FollowUpService::update_follow_up(&state.db, id, auth_user.id(), dto).await?;
    Ok(Json(follow_up))
}

/// Delete a follow-up (admin only)
#[utoipa::path(
    delete,
    path = "/api/followUps/{id}",
    params(("id" = i32, Path, description = "Follow-up id")),
    responses(
        (status = 200, description = "Follow-up deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Follow-up not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Follow-ups"
)]
#[instrument(skip(state))]
pub async fn delete_follow_up(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::FollowUps, Operation::Delete)?;

    FollowUpService::delete_follow_up(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Follow-up deleted successfully".to_string(),
    }))
}
