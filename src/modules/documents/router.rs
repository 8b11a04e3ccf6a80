use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_document, delete_document, get_document, get_documents, update_document,
};

pub fn init_documents_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_document).get(get_documents))
        .route(
            "/{id}",
            get(get_document)
                .put(update_document)
                .delete(delete_document),
        )
}
