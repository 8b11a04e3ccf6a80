use axum::extract::{Multipart, Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::users::model::{ChangePasswordDto, PhotoResponse, UpdateUserDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    check_capability(&auth_user, Resource::Users, Operation::List)?;

    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}

/// Get a user by id (self or admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<User>, AppError> {
    if !auth_user.can_act_on(id) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Not authorized to access this user"
        )));
    }

    let user = UserService::get_user_by_id(&state.db, id).await?;
    Ok(Json(user))
}

/// Update a user's profile (self or admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    if !auth_user.can_act_on(id) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Not authorized to update this user"
        )));
    }

    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(user))
}

/// Change a user's password (self or admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}/password",
    params(("id" = i32, Path, description = "User id")),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 401, description = "Current password missing or incorrect", body = ErrorResponse),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    if !auth_user.can_act_on(id) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Not authorized to change this user's password"
        )));
    }

    // Admins resetting another account skip the current-password check;
    // a user changing their own must prove they know it.
    let verify_current = !auth_user.is_admin() || auth_user.id() == id;
    UserService::change_password(&state.db, id, dto, verify_current).await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

/// Upload a profile photo (multipart field `photo`, self or admin)
#[utoipa::path(
    post,
    path = "/api/users/{id}/photo",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Photo stored", body = PhotoResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 413, description = "File exceeds 20 MiB", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_photo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<PhotoResponse>, AppError> {
    if !auth_user.can_act_on(id) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Not authorized to update this user's photo"
        )));
    }

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("photo") {
            let filename = field.file_name().unwrap_or("photo").to_string();
            // The body limit surfaces here as a 413; any other read
            // failure is a malformed request, not an oversized one.
            let bytes = field.bytes().await.map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::payload_too_large(anyhow::anyhow!("Failed to read upload: {}", e))
                } else {
                    AppError::bad_request(anyhow::anyhow!("Failed to read upload: {}", e))
                }
            })?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, content) =
        upload.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("No file uploaded")))?;

    let photo_url =
        UserService::update_photo(&state.db, &state.photo_storage, id, &filename, &content)
            .await?;

    Ok(Json(PhotoResponse { photo_url }))
}

/// Delete a user (admin only, blocked for the last admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Would remove the last admin", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    check_capability(&auth_user, Resource::Users, Operation::Delete)?;

    UserService::delete_user(&state.db, &state.photo_storage, id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }),
    ))
}
