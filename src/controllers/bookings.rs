use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::{CustomerInfo, NewBooking, PaymentMethod};
use crate::utils::{response::success, AppError};
use crate::AppState;

pub const MISSING_CUSTOMER_INFO: &str = "Missing customer information";
pub const NO_SEATS_SELECTED: &str = "No seats selected";
pub const CUSTOMER_INFO_TOO_LONG: &str = "Customer information is too long";

// Размеры колонок bookings.customer_*
const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 20;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/book", post(book_seats))
}

/* ---------- REQUEST ---------- */

// POST /api/book
// Отсутствующие поля превращаются в пустые значения и отсекаются валидацией
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct BookRequest {
    #[validate(
        length(min = 1, message = "Missing customer information"),
        custom(function = "name_fits")
    )]
    pub customer_name: String,
    #[validate(
        length(min = 1, message = "Missing customer information"),
        custom(function = "email_fits")
    )]
    pub customer_email: String,
    #[validate(
        length(min = 1, message = "Missing customer information"),
        custom(function = "phone_fits")
    )]
    pub customer_phone: String,
    pub payment_method: String,
    #[validate(length(min = 1, message = "No seats selected"))]
    pub seat_ids: Vec<i32>,
    // Верхняя граница NUMERIC(10, 2)
    #[validate(range(min = 0.0, max = 99_999_999.99, message = "Invalid total amount"))]
    pub total_amount: f64,
}

impl BookRequest {
    /// Проверяет запрос до любого обращения к БД.
    pub fn into_new_booking(mut self) -> Result<NewBooking, AppError> {
        self.customer_name = self.customer_name.trim().to_string();
        self.customer_email = self.customer_email.trim().to_string();
        self.customer_phone = self.customer_phone.trim().to_string();

        if let Err(errors) = self.validate() {
            let messages: Vec<String> = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect();

            // Порядок проверок фиксирован: сначала клиент, потом места
            let message = [MISSING_CUSTOMER_INFO, CUSTOMER_INFO_TOO_LONG, NO_SEATS_SELECTED]
                .into_iter()
                .find(|m| messages.iter().any(|got| got == m))
                .map(str::to_string)
                .or_else(|| messages.into_iter().next())
                .unwrap_or_else(|| "Invalid request payload".to_string());

            return Err(AppError::Validation(message));
        }

        let payment_method: PaymentMethod = self
            .payment_method
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Unsupported payment method".to_string()))?;

        Ok(NewBooking {
            customer: CustomerInfo {
                customer_name: self.customer_name,
                customer_email: self.customer_email,
                customer_phone: self.customer_phone,
            },
            payment_method,
            total_amount: self.total_amount,
            seat_ids: self.seat_ids,
        })
    }
}

fn fits(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new("too_long").with_message(Cow::Borrowed(CUSTOMER_INFO_TOO_LONG)));
    }
    Ok(())
}

fn name_fits(value: &str) -> Result<(), ValidationError> {
    fits(value, MAX_NAME_LEN)
}

fn email_fits(value: &str) -> Result<(), ValidationError> {
    fits(value, MAX_EMAIL_LEN)
}

fn phone_fits(value: &str) -> Result<(), ValidationError> {
    fits(value, MAX_PHONE_LEN)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookResponse {
    booking_id: i32,
}

async fn book_seats(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let booking = super::json_body(payload)?.into_new_booking()?;

    let booking_id = state.ledger.create_booking(&booking).await?;

    Ok(success(
        StatusCode::CREATED,
        "Booking successful",
        BookResponse { booking_id },
    ))
}
