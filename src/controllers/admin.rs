use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::middleware::AdminGuard;
use crate::models::BookingStatus;
use crate::utils::{response::{empty_success, success}, AppError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/bookings", get(pending_bookings))
        .route("/admin/verify", post(verify_payment))
}

/* ---------- LOGIN ---------- */

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    authenticated: bool,
}

// POST /api/admin/login
// Токен не выдаётся: ответ только подтверждает, что учётка верна
async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = super::json_body(payload)?;

    if !state.admins.verify_admin(&req.username, &req.password).await? {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    info!("👤 Admin '{}' logged in", req.username);
    Ok(success(StatusCode::OK, "Login successful", LoginResponse { authenticated: true }))
}

/* ---------- BOOKINGS ---------- */

// GET /api/admin/bookings
async fn pending_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminGuard,
) -> Result<Response, AppError> {
    let bookings = state.ledger.list_pending_bookings().await?;
    Ok(success(StatusCode::OK, "Pending bookings retrieved successfully", bookings))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyRequest {
    pub booking_id: i32,
    pub status: String,
}

impl VerifyRequest {
    /// Администратор может только подтвердить или отменить бронь.
    pub fn target(&self) -> Result<(i32, BookingStatus), AppError> {
        if self.booking_id <= 0 {
            return Err(AppError::Validation("Invalid booking id".to_string()));
        }

        match self.status.parse::<BookingStatus>() {
            Ok(status @ (BookingStatus::Confirmed | BookingStatus::Cancelled)) => {
                Ok((self.booking_id, status))
            }
            _ => Err(AppError::Validation(
                "Status must be either confirmed or cancelled".to_string(),
            )),
        }
    }
}

// POST /api/admin/verify
async fn verify_payment(
    State(state): State<Arc<AppState>>,
    admin: AdminGuard,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let (booking_id, status) = super::json_body(payload)?.target()?;

    state.ledger.update_booking_status(booking_id, status).await?;

    info!(
        "👤 Booking {} marked {} by {}",
        booking_id,
        status,
        admin.username.as_deref().unwrap_or("unauthenticated caller")
    );
    Ok(empty_success("Booking status updated successfully"))
}
