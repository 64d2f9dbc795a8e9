use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::SeatStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
}

string_enum!(PaymentMethod, "payment method", {
    BankTransfer => "bank_transfer",
    Cash => "cash",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

string_enum!(BookingStatus, "booking status", {
    Pending => "pending",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

impl BookingStatus {
    /// Статус, который получают все места брони при переходе в `self`.
    pub fn seat_status(&self) -> SeatStatus {
        match self {
            BookingStatus::Confirmed => SeatStatus::NotAvailable,
            BookingStatus::Cancelled => SeatStatus::Available,
            BookingStatus::Pending => SeatStatus::Booked,
        }
    }

    /// Из confirmed/cancelled переходов нет.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// Данные для создания брони. Сумма и набор мест после создания не меняются.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethod,
    pub total_amount: f64,
    pub seat_ids: Vec<i32>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    pub total_amount: f64,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWithSeats {
    #[serde(flatten)]
    pub booking: Booking,
    pub seats: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn transitions_map_to_seat_statuses() {
        assert_eq!(BookingStatus::Confirmed.seat_status(), SeatStatus::NotAvailable);
        assert_eq!(BookingStatus::Cancelled.seat_status(), SeatStatus::Available);
        assert_eq!(BookingStatus::Pending.seat_status(), SeatStatus::Booked);
    }

    #[test]
    fn only_pending_is_open() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn payment_method_accepts_only_known_values() {
        assert_eq!("bank_transfer".parse::<PaymentMethod>(), Ok(PaymentMethod::BankTransfer));
        assert_eq!("cash".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert!("card".parse::<PaymentMethod>().is_err());
        assert!("".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn booking_with_seats_is_flat_camel_case() {
        let booking = Booking {
            id: 3,
            customer_name: "Ana".into(),
            customer_email: "ana@example.com".into(),
            customer_phone: "+100".into(),
            payment_method: PaymentMethod::BankTransfer,
            total_amount: 150.5,
            status: BookingStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(BookingWithSeats {
            booking,
            seats: vec!["A1 (regular)".into()],
        })
        .unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["customerName"], "Ana");
        assert_eq!(json["paymentMethod"], "bank_transfer");
        assert_eq!(json["totalAmount"], 150.5);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["seats"][0], "A1 (regular)");
        assert!(json["createdAt"].as_str().unwrap().starts_with("2026-05-01T12:00:00"));
    }
}
