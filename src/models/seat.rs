use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    Regular,
    Vip,
    Sponsored,
}

string_enum!(SeatType, "seat type", {
    Regular => "regular",
    Vip => "vip",
    Sponsored => "sponsored",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "booked")]
    Booked,
    /// Продано, финальное состояние
    #[serde(rename = "not-available")]
    NotAvailable,
    /// Зарезервировано спонсором при начальной загрузке
    #[serde(rename = "sponsored")]
    Sponsored,
}

string_enum!(SeatStatus, "seat status", {
    Available => "available",
    Booked => "booked",
    NotAvailable => "not-available",
    Sponsored => "sponsored",
});

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub id: i32,
    pub row: String,
    pub number: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub seat_type: SeatType,
    #[sqlx(try_from = "String")]
    pub status: SeatStatus,
}

impl Seat {
    /// Человекочитаемое описание вида `E14 (vip)`.
    pub fn label(row: &str, number: i32, seat_type: SeatType) -> String {
        format!("{}{} ({})", row, number, seat_type)
    }
}
