use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_notification, delete_notification, get_notification, get_notifications,
    update_notification,
};

pub fn init_notifications_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_notification).get(get_notifications))
        .route(
            "/{id}",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
}
