use axum::{Router, routing::get};

use crate::modules::audit::controller::{create_audit_log, get_audit_logs};
use crate::state::AppState;

pub fn init_audit_router() -> Router<AppState> {
    Router::new().route("/", get(get_audit_logs).post(create_audit_log))
}
