use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{Operation, Resource, check_capability};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::menus::model::{CreateMonthlyMenuDto, MonthlyMenu, UpdateMonthlyMenuDto};
use crate::modules::menus::service::MenuService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all monthly menus
#[utoipa::path(
    get,
    path = "/api/menus",
    responses(
        (status = 200, description = "List of menus", body = Vec<MonthlyMenu>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
#[instrument(skip(state))]
pub async fn get_menus(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<MonthlyMenu>>, AppError> {
    check_capability(&auth_user, Resource::Menus, Operation::List)?;

    let menus = MenuService::get_menus(&state.db).await?;
    Ok(Json(menus))
}

/// Get a monthly menu by id
#[utoipa::path(
    get,
    path = "/api/menus/{id}",
    params(("id" = i32, Path, description = "Menu id")),
    responses(
        (status = 200, description = "Menu", body = MonthlyMenu),
        (status = 404, description = "Menu not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MonthlyMenu>, AppError> {
    check_capability(&auth_user, Resource::Menus, Operation::Get)?;

    let menu = MenuService::get_menu_by_id(&state.db, id).await?;
    Ok(Json(menu))
}

/// Create a monthly menu (admin or teacher); the caller becomes the uploader
#[utoipa::path(
    post,
    path = "/api/menus",
    request_body = CreateMonthlyMenuDto,
    responses(
        (status = 201, description = "Menu created", body = MonthlyMenu),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
#[instrument(skip(state, dto))]
pub async fn create_menu(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateMonthlyMenuDto>,
) -> Result<(StatusCode, Json<MonthlyMenu>), AppError> {
    check_capability(&auth_user, Resource::Menus, Operation::Create)?;

    let menu = MenuService::create_menu(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

/// Update a monthly menu (admin or teacher)
#[utoipa::path(
    put,
    path = "/api/menus/{id}",
    params(("id" = i32, Path, description = "Menu id")),
    request_body = UpdateMonthlyMenuDto,
    responses(
        (status = 200, description = "Updated menu", body = MonthlyMenu),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Menu not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
#[instrument(skip(state, dto))]
pub async fn update_menu(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateMonthlyMenuDto>,
) -> Result<Json<MonthlyMenu>, AppError> {
    check_capability(&auth_user, Resource::Menus, Operation::Update)?;

    let menu = MenuService::update_menu(&state.db, id, dto).await?;
    Ok(Json(menu))
}

/// Delete a monthly menu (admin only)
#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    params(("id" = i32, Path, description = "Menu id")),
    responses(
        (status = 200, description = "Menu deleted", body = MessageResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Menu not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
#[instrument(skip(state))]
pub async fn delete_menu(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    check_capability(&auth_user, Resource::Menus, Operation::Delete)?;

    MenuService::delete_menu(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Menu deleted successfully".to_string(),
    }))
}
