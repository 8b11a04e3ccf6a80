use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::config::uploads::MAX_UPLOAD_BYTES;
use crate::state::AppState;

use super::controller::{
    change_password, delete_user, get_user, get_users, update_user, upload_photo,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/password", put(change_password))
        .route(
            "/{id}/photo",
            // Body limit leaves headroom for multipart framing; the exact
            // 20 MiB ceiling on the file itself is enforced in storage.
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024)),
        )
}
