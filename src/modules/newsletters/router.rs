use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_newsletter, delete_newsletter, get_newsletter, get_newsletters, update_newsletter,
};

pub fn init_newsletters_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_newsletter).get(get_newsletters))
        .route(
            "/{id}",
            get(get_newsletter)
                .put(update_newsletter)
                .delete(delete_newsletter),
        )
}
