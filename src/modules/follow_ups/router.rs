use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_follow_up, delete_follow_up, get_follow_up, get_follow_ups, update_follow_up,
};

pub fn init_follow_ups_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_follow_up).get(get_follow_ups))
        .route(
            "/{id}",
            get(get_follow_up)
                .put(update_follow_up)
                .delete(delete_follow_up),
        )
}
