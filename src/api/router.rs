use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, cancel_reservation, create_reservation, get_reservation, list_available,
    list_by_category, list_reservations, list_reservations_by_client, update_reservation,
};

/// Creates the API router with all reservation endpoints
///
/// Reservation endpoints:
/// - POST /reservations - Create a booking
/// - GET /reservations - List bookings (optional ?status=)
/// - GET /reservations/:id - Get one booking
/// - PUT /reservations/:id - Patch a booking
/// - DELETE /reservations/:id - Cancel a booking
/// - GET /reservations/user/:user_id - List bookings of a client
///
/// Inventory endpoints:
/// - GET /costumes/available - List bookable costumes
/// - GET /costumes/category/:category - List costumes of a category
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/reservations", post(create_reservation).get(list_reservations))
        .route(
            "/reservations/:id",
            get(get_reservation)
                .put(update_reservation)
                .delete(cancel_reservation),
        )
        .route("/reservations/user/:user_id", get(list_reservations_by_client))
        .route("/costumes/available", get(list_available))
        .route("/costumes/category/:category", get(list_by_category))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
