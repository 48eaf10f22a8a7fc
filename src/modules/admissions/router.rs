use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::admissions::controller::{
    approve_application, get_application, get_applications, reject_application,
    submit_application,
};
use crate::state::AppState;

pub fn init_admissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_applications).post(submit_application))
        .route("/{id}", get(get_application))
        .route("/{id}/approve", post(approve_application))
        .route("/{id}/reject", post(reject_application))
}
