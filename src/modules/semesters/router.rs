use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::semesters::controller::{
    activate_semester, create_semester, delete_semester, get_active_semester, get_semester,
    get_semesters, update_semester,
};
use crate::state::AppState;

pub fn init_semesters_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_semesters).post(create_semester))
        .route("/active", get(get_active_semester))
        .route(
            "/{id}",
            get(get_semester).put(update_semester).delete(delete_semester),
        )
        .route("/{id}/activate", put(activate_semester))
}
