use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::courses::controller::{
    add_prerequisite, assign_lecturer, create_course, delete_course, get_course, get_courses,
    get_dependent_courses, remove_prerequisite, update_course,
};
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/{id}/dependents", get(get_dependent_courses))
        .route(
            "/{id}/prerequisites/{prereq_id}",
            post(add_prerequisite).delete(remove_prerequisite),
        )
        .route("/{id}/lecturer", put(assign_lecturer))
}
