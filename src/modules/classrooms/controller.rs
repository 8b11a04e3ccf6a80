use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::classrooms::model::{Classroom, CreateClassroomDto, UpdateClassroomDto};
use crate::modules::classrooms::service::ClassroomService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all classrooms
#[utoipa::path(
    get,
    path = "/api/classrooms",
    responses(
        (status = 200, description = "List of classrooms", body = Vec<Classroom>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classrooms"
)]
#[instrument(skip(state))]
pub async fn get_classrooms(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Classroom>>, AppError> {
    check_capability(&auth_user, Resource::Classrooms, Operation::List)?;

    let classrooms = ClassroomService::get_classrooms(&state.db).await?;
    Ok(Json(classrooms))
}

/// Get a classroom by id
#[utoipa::path(
    get,
    path = "/api/classrooms/{id}",
    params(("id" = i32, Path, description = "Classroom id")),
    responses(
        (status = 200, description = "Classroom", body = Classroom),
        (status = 404, description = "Classroom not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classrooms"
)]
#[instrument(skip(state))]
pub async fn get_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Classroom>, AppError> {
    check_capability(&auth_user, Resource::Classrooms, Operation::Get)?;

    let classroom = ClassroomService::get_classroom_by_id(&state.db, id).await?;
    Ok(Json(classroom))
}

/// Create a classroom (admin only)
#[utoipa::path(
    post,
    path = "/api/classrooms",
    request_body = CreateClassroomDto,
    responses(
        (status = 201, description = "Classroom created", body = Classroom),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classrooms"
)]
#[instrument(skip(state, dto))]
pub async fn create_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassroomDto>,
) -> Result<(StatusCode, Json<Classroom>), AppError> {
    check_capability(&auth_user, Resource::Classrooms, Operation::Create)?;

    let classroom = ClassroomService::create_classroom(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

/// Update a classroom (admin only)
#[utoipa::path(
    put,
    path = "/api/classrooms/{id}",
    params(("id" = i32, Path, description = "Classroom id")),
    request_body = UpdateClassroomDto,
    responses(
        (status = 200, description = "Updated classroom", body = Classroom),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classrooms"
)]
#[instrument(skip(state, dto))]
pub async fn update_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateClassroomDto>,
) -> Result<Json<Classroom>, AppError> {
    check_capability(&auth_user, Resource::Classrooms, Operation::Update)?;

    let classroom = ClassroomService::update_classroom(&state.db, id, dto).await?;
    Ok(Json(classroom))
}

/// Delete a classroom (admin only)
#[utoipa::path(
    delete,
    path = "/api/classrooms/{id}",
    params(("id" = i32, Path, description = "Classroom id")),
    responses(
        (status = 200, description = "Classroom deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classrooms"
)]
#[instrument(skip(state))]
pub async fn delete_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Classrooms, Operation::Delete)?;

    ClassroomService::delete_classroom(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Classroom deleted successfully".to_string(),
    }))
}
