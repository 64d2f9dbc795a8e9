use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use crate::models::{Seat, SeatStatus, SeatType};
use crate::utils::AppError;

/// Одно место из фиксированной схемы зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatSpec {
    pub row: char,
    pub number: i32,
    pub seat_type: SeatType,
    pub status: SeatStatus,
}

impl SeatSpec {
    fn new(row: char, number: i32, seat_type: SeatType) -> Self {
        let status = match seat_type {
            SeatType::Sponsored => SeatStatus::Sponsored,
            SeatType::Regular | SeatType::Vip => SeatStatus::Available,
        };
        Self { row, number, seat_type, status }
    }
}

/// Схема зала:
/// - A: 1-13 и 18-30, обычные;
/// - B-D: 1-30 без 13-18;
/// - E-K: 1-30, места 13-18 VIP;
/// - L: 1-7 и 24-30 обычные, 8-23 спонсорские (сразу недоступны).
pub fn venue_layout() -> Vec<SeatSpec> {
    let mut seats = Vec::new();

    seats.extend(
        (1..=30)
            .filter(|n| *n <= 13 || *n >= 18)
            .map(|n| SeatSpec::new('A', n, SeatType::Regular)),
    );

    for row in 'B'..='K' {
        for n in 1..=30 {
            let middle = (13..=18).contains(&n);
            if middle && row <= 'D' {
                continue;
            }
            let seat_type = if middle { SeatType::Vip } else { SeatType::Regular };
            seats.push(SeatSpec::new(row, n, seat_type));
        }
    }

    seats.extend((1..=30).map(|n| {
        let seat_type = if (8..=23).contains(&n) { SeatType::Sponsored } else { SeatType::Regular };
        SeatSpec::new('L', n, seat_type)
    }));

    seats
}

#[derive(Clone)]
pub struct SeatInventory {
    pool: PgPool,
}

impl SeatInventory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Все места, по ряду и номеру.
    pub async fn list_seats(&self) -> Result<Vec<Seat>, AppError> {
        let seats = sqlx::query_as::<_, Seat>(
            "SELECT id, row, number, type, status FROM seats ORDER BY row, number"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Заполняет зал, если таблица мест пуста. Возвращает число вставленных мест.
    pub async fn seed(&self) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seats")
            .fetch_one(&mut *tx)
            .await?;

        if existing > 0 {
            info!("🪑 Seats already seeded ({} rows), skipping", existing);
            return Ok(0);
        }

        let layout = venue_layout();
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO seats (row, number, type, status) ");
        builder.push_values(layout.iter(), |mut b, seat| {
            b.push_bind(seat.row.to_string())
                .push_bind(seat.number)
                .push_bind(seat.seat_type.as_str())
                .push_bind(seat.status.as_str());
        });
        // Параллельный старт второго экземпляра не должен дублировать места
        builder.push(" ON CONFLICT (row, number) DO NOTHING");

        let inserted = builder.build().execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;

        info!("🪑 Seeded {} seats", inserted);
        Ok(inserted)
    }
}
