use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_authorization, delete_authorization, get_authorization, get_authorizations,
    update_authorization,
};

pub fn init_authorizations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_authorization).get(get_authorizations))
        .route(
            "/{id}",
            get(get_authorization)
                .put(update_authorization)
                .delete(delete_authorization),
        )
}
