use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::authorizations::router::init_authorizations_router;
use crate::modules::classrooms::router::init_classrooms_router;
use crate::modules::documents::router::init_documents_router;
use crate::modules::follow_ups::router::init_follow_ups_router;
use crate::modules::menus::router::init_menus_router;
use crate::modules::newsletters::router::init_newsletters_router;
use crate::modules::notifications::router::init_notifications_router;
use crate::modules::parents::router::init_parents_router;
use crate::modules::students::router::init_students_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    // Serve the photo directory at the same prefix save() stamps on user
    // rows, so an UPLOAD_DIR override keeps stored references resolvable.
    let uploads_prefix = state.upload_config.public_prefix.clone();
    let uploads_dir = state.upload_config.base_dir.clone();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router())
                .nest("/students", init_students_router())
                .nest("/classrooms", init_classrooms_router())
                .nest("/teachers", init_teachers_router())
                .nest("/parents", init_parents_router())
                .nest("/authorizations", init_authorizations_router())
                .nest("/newsletters", init_newsletters_router())
                .nest("/notifications", init_notifications_router())
                .nest("/menus", init_menus_router())
                .nest("/documents", init_documents_router())
                .nest("/followUps", init_follow_ups_router()),
        )
        .nest_service(&uploads_prefix, ServeDir::new(uploads_dir))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
