use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::notifications::model::{
    CreateNotificationDto, Notification, UpdateNotificationDto,
};
use crate::modules::notifications::service::NotificationService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List notifications the caller sent or received
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications visible to the caller", body = Vec<Notification>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn get_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    check_capability(&auth_user, Resource::Notifications, Operation::List)?;

    let notifications =
        NotificationService::get_notifications(&state.db, auth_user.id()).await?;
    Ok(Json(notifications))
}

/// Get a notification by id (sender or recipient only)
#[utoipa::path(
    get,
    path = "/api/notifications/{id}",
    params(("id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification", body = Notification),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn get_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Notification>, AppError> {
    check_capability(&auth_user, Resource::Notifications, Operation::Get)?;

    let notification =
        NotificationService::get_notification_by_id(&state.db, id, auth_user.id()).await?;
    Ok(Json(notification))
}

/// Send a notification (admin or teacher); the caller becomes the sender
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 400, description = "Recipient does not exist", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state, dto))]
pub async fn create_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNotificationDto>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    check_capability(&auth_user, Resource::Notifications, Operation::Create)?;

    let notification =
        NotificationService::create_notification(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Update a notification (sender only; foreign rows answer 404)
#[utoipa::path(
    put,
    path = "/api/notifications/{id}",
    params(("id" = i32, Path, description = "Notification id")),
    request_body = UpdateNotificationDto,
    responses(
        (status = 200, description = "Updated notification", body = Notification),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state, dto))]
pub async fn update_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateNotificationDto>,
) -> Result<Json<Notification>, AppError> {
    check_capability(&auth_user, Resource::Notifications, Operation::Update)?;

    let notification =
        NotificationService::update_notification(&state.db, id, auth_user.id(), dto).await?;
    Ok(Json(notification))
}

/// Delete a notification (sender only; foreign rows answer 404)
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn delete_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Notifications, Operation::Delete)?;

    NotificationService::delete_notification(&state.db, id, auth_user.id()).await?;
    Ok(Json(MessageResponse {
        message: "Notification deleted successfully".to_string(),
    }))
}
