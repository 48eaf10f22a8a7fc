use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::assignments::controller::{
    create_assignment, delete_assignment, get_assignment, get_assignments, submit_assignment,
};
use crate::state::AppState;

pub fn init_assignments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_assignments).post(create_assignment))
        .route("/{id}", get(get_assignment).delete(delete_assignment))
        .route("/{id}/submit", post(submit_assignment))
}
