pub mod admin;
pub mod bookings;
pub mod seats;

use axum::{extract::rejection::JsonRejection, Json, Router};
use std::sync::Arc;

use crate::utils::AppError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(seats::routes())
        .merge(bookings::routes())
        .merge(admin::routes())
        .method_not_allowed_fallback(method_not_allowed)
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Ошибка разбора JSON отдаётся тем же конвертом, а не текстом axum.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("rejected request body: {}", rejection.body_text());
            Err(AppError::Validation("Invalid request payload".to_string()))
        }
    }
}
