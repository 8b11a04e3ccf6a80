use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_menu, delete_menu, get_menu, get_menus, update_menu};

pub fn init_menus_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_menu).get(get_menus))
        .route("/{id}", get(get_menu).put(update_menu).delete(delete_menu))
}
