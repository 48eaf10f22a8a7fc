use axum::{Router, routing::get};

use crate::modules::fees::controller::{
    create_fee_structure, create_payment, delete_fee_structure, get_clearance,
    get_clearance_stats, get_clearances, get_fee_structure, get_fee_structures, get_payments,
    update_fee_structure, upsert_clearance,
};
use crate::state::AppState;

pub fn init_fees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_fee_structures).post(create_fee_structure))
        .route(
            "/{id}",
            get(get_fee_structure)
                .put(update_fee_structure)
                .delete(delete_fee_structure),
        )
}

pub fn init_payments_router() -> Router<AppState> {
    Router::new().route("/", get(get_payments).post(create_payment))
}

pub fn init_clearances_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_clearances).put(upsert_clearance))
        .route("/stats", get(get_clearance_stats))
        .route("/{student_id}", get(get_clearance))
}
