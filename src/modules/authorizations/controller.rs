use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::authorizations::model::{
    Authorization, CreateAuthorizationDto, UpdateAuthorizationDto,
};
use crate::modules::authorizations::service::AuthorizationService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all authorization requests (admin or teacher)
#[utoipa::path(
    get,
    path = "/api/authorizations",
    responses(
        (status = 200, description = "List of authorizations", body = Vec<Authorization>),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authorizations"
)]
#[instrument(skip(state))]
pub async fn get_authorizations(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Authorization>>, AppError> {
    check_capability(&auth_user, Resource::Authorizations, Operation::List)?;

    let authorizations = AuthorizationService::get_authorizations(&state.db).await?;
    Ok(Json(authorizations))
}

/// Get an authorization request by id
#[utoipa::path(
    get,
    path = "/api/authorizations/{id}",
    params(("id" = i32, Path, description = "Authorization id")),
    responses(
        (status = 200, description = "Authorization", body = Authorization),
        (status = 404, description = "Authorization not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authorizations"
)]
#[instrument(skip(state))]
pub async fn get_authorization(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Authorization>, AppError> {
    check_capability(&auth_user, Resource::Authorizations, Operation::Get)?;

    let authorization = AuthorizationService::get_authorization_by_id(&state.db, id).await?;
    Ok(Json(authorization))
}

/// Create an authorization request (admin or teacher)
#[utoipa::path(
    post,
    path = "/api/authorizations",
    request_body = CreateAuthorizationDto,
    responses(
        (status = 201, description = "Authorization created", body = Authorization),
        (status = 400, description = "Validation or reference error", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authorizations"
)]
#[instrument(skip(state, dto))]
pub async fn create_authorization(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAuthorizationDto>,
) -> Result<(StatusCode, Json<Authorization>), AppError> {
    check_capability(&auth_user, Resource::Authorizations, Operation::Create)?;

    let authorization =
        AuthorizationService::create_authorization(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(authorization)))
}

/// Update an authorization request (admin or teacher)
#[utoipa::path(
    put,
    path = "/api/authorizations/{id}",
    params(("id" = i32, Path, description = "Authorization id")),
    request_body = UpdateAuthorizationDto,
    responses(
        (status = 200, description = "Updated authorization", body = Authorization),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Authorization not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authorizations"
)]
#[instrument(skip(state, dto))]
pub async fn update_authorization(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateAuthorizationDto>,
) -> Result<Json<Authorization>, AppError> {
    check_capability(&auth_user, Resource::Authorizations, Operation::Update)?;

    let authorization =
        AuthorizationService::update_authorization(&state.db, id, auth_user.id(), dto).await?;
    Ok(Json(authorization))
}

/// Delete an authorization request (admin only)
#[utoipa::path(
    delete,
    path = "/api/authorizations/{id}",
    params(("id" = i32, Path, description = "Authorization id")),
    responses(
        (status = 200, description = "Authorization deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Authorization not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authorizations"
)]
#[instrument(skip(state))]
pub async fn delete_authorization(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Authorizations, Operation::Delete)?;

    AuthorizationService::delete_authorization(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Authorization deleted successfully".to_string(),
    }))
}
