use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::admissions::router::init_admissions_router;
use crate::modules::announcements::router::init_announcements_router;
use crate::modules::assignments::router::init_assignments_router;
use crate::modules::audit::router::init_audit_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::documents::router::init_documents_router;
use crate::modules::fees::router::{
    init_clearances_router, init_fees_router, init_payments_router,
};
use crate::modules::grades::router::init_grades_router;
use crate::modules::hostels::router::{
    init_bookings_router, init_hostels_router, init_rooms_router,
};
use crate::modules::registrations::router::init_registrations_router;
use crate::modules::semesters::router::init_semesters_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router())
                .nest("/semesters", init_semesters_router())
                .nest("/courses", init_courses_router())
                .nest("/registrations", init_registrations_router())
                .nest("/grades", init_grades_router())
                .nest("/hostels", init_hostels_router())
                .nest("/rooms", init_rooms_router())
                .nest("/bookings", init_bookings_router())
                .nest("/fees", init_fees_router())
                .nest("/payments", init_payments_router())
                .nest("/clearances", init_clearances_router())
                .nest("/admissions", init_admissions_router())
                .nest("/announcements", init_announcements_router())
                .nest("/audit-logs", init_audit_router())
                .nest("/documents", init_documents_router())
                .nest("/assignments", init_assignments_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
