use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::documents::controller::{
    create_document_request, delete_document_request, get_document_requests,
    update_document_request,
};
use crate::state::AppState;

pub fn init_documents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_document_requests).post(create_document_request))
        .route(
            "/{id}",
            patch(update_document_request).delete(delete_document_request),
        )
}
