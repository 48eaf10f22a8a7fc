use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::registrations::controller::{
    create_registration, delete_registration, get_registrations,
};
use crate::state::AppState;

pub fn init_registrations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_registrations).post(create_registration))
        .route("/{id}", delete(delete_registration))
}
