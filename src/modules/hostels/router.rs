use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::hostels::controller::{
    create_booking, create_hostel, create_room, delete_hostel, delete_room, get_bookings,
    get_hostel, get_hostels, get_room, get_rooms, release_booking, update_hostel, update_room,
};
use crate::state::AppState;

pub fn init_hostels_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_hostels).post(create_hostel))
        .route(
            "/{id}",
            get(get_hostel).patch(update_hostel).delete(delete_hostel),
        )
}

pub fn init_rooms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_rooms).post(create_room))
        .route(
            "/{id}",
            get(get_room).patch(update_room).delete(delete_room),
        )
}

pub fn init_bookings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_bookings).post(create_booking))
        .route("/{id}", delete(release_booking))
}
