use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::utils::{response::success, AppError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(list_seats))
}

// GET /api/seats
async fn list_seats(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let seats = state.inventory.list_seats().await?;
    Ok(success(StatusCode::OK, "Seats retrieved successfully", seats))
}
