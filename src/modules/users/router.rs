use axum::{
    Router,
    routing::get,
};

use crate::modules::users::controller::{
    delete_user, get_lecturers, get_programs, get_user, get_users, update_user,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/lecturers", get(get_lecturers))
        .route("/programs", get(get_programs))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
