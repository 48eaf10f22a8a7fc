use axum::{Router, routing::get};

use crate::modules::grades::controller::{create_grade, get_grades};
use crate::state::AppState;

pub fn init_grades_router() -> Router<AppState> {
    Router::new().route("/", get(get_grades).post(create_grade))
}
