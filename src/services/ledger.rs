use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::{Booking, BookingStatus, BookingWithSeats, NewBooking, Seat, SeatStatus, SeatType};
use crate::utils::AppError;

/// Итог одного прохода очистки просроченных броней.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub bookings_expired: usize,
    pub seats_released: u64,
}

/// Журнал броней: создание, смена статуса и освобождение мест.
/// Каждая изменяющая операция выполняется в одной транзакции.
#[derive(Clone)]
pub struct BookingLedger {
    pool: PgPool,
    strict_availability: bool,
}

impl BookingLedger {
    pub fn new(pool: PgPool, strict_availability: bool) -> Self {
        Self { pool, strict_availability }
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> Result<i32, AppError> {
        if booking.seat_ids.is_empty() {
            return Err(AppError::Validation("No seats selected".to_string()));
        }

        // Места блокируются в одном порядке, чтобы встречные брони не ловили deadlock
        let mut seat_ids = booking.seat_ids.clone();
        seat_ids.sort_unstable();
        if seat_ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(AppError::Validation("Duplicate seats selected".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let booking_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings
                (customer_name, customer_email, customer_phone, payment_method, total_amount, status)
            VALUES ($1, $2, $3, $4, CAST($5 AS NUMERIC(10, 2)), 'pending')
            RETURNING id
            "#
        )
        .bind(&booking.customer.customer_name)
        .bind(&booking.customer.customer_email)
        .bind(&booking.customer.customer_phone)
        .bind(booking.payment_method.as_str())
        .bind(booking.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        for seat_id in &seat_ids {
            self.mark_seat_booked(&mut tx, *seat_id).await?;

            sqlx::query("INSERT INTO booking_seats (booking_id, seat_id) VALUES ($1, $2)")
                .bind(booking_id)
                .bind(seat_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!("🎫 Booking {} created for {} seats", booking_id, seat_ids.len());
        Ok(booking_id)
    }

    async fn mark_seat_booked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seat_id: i32,
    ) -> Result<(), AppError> {
        let query = if self.strict_availability {
            "UPDATE seats SET status = 'booked' WHERE id = $1 AND status = 'available'"
        } else {
            "UPDATE seats SET status = 'booked' WHERE id = $1"
        };

        let updated = sqlx::query(query)
            .bind(seat_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if updated > 0 {
            return Ok(());
        }

        let current: Option<String> = sqlx::query_scalar("SELECT status FROM seats WHERE id = $1")
            .bind(seat_id)
            .fetch_optional(&mut **tx)
            .await?;

        match current {
            None => Err(AppError::NotFound(format!("Seat {} not found", seat_id))),
            Some(status) => {
                debug!("seat {} rejected, current status {}", seat_id, status);
                Err(AppError::Conflict(format!("Seat {} is not available", seat_id)))
            }
        }
    }

    /// Переводит pending-бронь в `status` и меняет статус всех её мест.
    pub async fn update_booking_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?;

        let current: BookingStatus = current
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?
            .parse()?;

        if current.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Booking {} is already {}",
                booking_id, current
            )));
        }

        sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        let seat_status = status.seat_status();
        let seats = sqlx::query(
            r#"
            UPDATE seats
            SET status = $1
            WHERE id IN (SELECT seat_id FROM booking_seats WHERE booking_id = $2)
            "#
        )
        .bind(seat_status.as_str())
        .bind(booking_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        info!("🎫 Booking {} is now {} ({} seats -> {})", booking_id, status, seats, seat_status);
        Ok(())
    }

    /// Pending-брони, новые сначала, с описанием мест.
    pub async fn list_pending_bookings(&self) -> Result<Vec<BookingWithSeats>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, customer_name, customer_email, customer_phone, payment_method,
                   total_amount::FLOAT8 AS total_amount, status, created_at
            FROM bookings
            WHERE status = 'pending'
            ORDER BY created_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = bookings.iter().map(|b| b.id).collect();
        let rows: Vec<(i32, String, i32, String)> = sqlx::query_as(
            r#"
            SELECT bs.booking_id, s.row, s.number, s.type
            FROM booking_seats bs
            JOIN seats s ON s.id = bs.seat_id
            WHERE bs.booking_id = ANY($1)
            ORDER BY bs.booking_id, s.row, s.number
            "#
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let mut seats: HashMap<i32, Vec<String>> = HashMap::new();
        for (booking_id, row, number, seat_type) in rows {
            let seat_type: SeatType = seat_type.parse()?;
            seats
                .entry(booking_id)
                .or_default()
                .push(Seat::label(&row, number, seat_type));
        }

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let seats = seats.remove(&booking.id).unwrap_or_default();
                BookingWithSeats { booking, seats }
            })
            .collect())
    }

    /// Отменяет брони, провисевшие в pending дольше `max_age`, и возвращает
    /// их места в продажу. Повторный вызов без новых просрочек ничего не меняет.
    pub async fn release_expired_bookings(&self, max_age: Duration) -> Result<ReleaseSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let expired: Vec<i32> = sqlx::query_scalar(
            r#"
            UPDATE bookings
            SET status = 'cancelled'
            WHERE status = 'pending' AND created_at <= NOW() - $1
            RETURNING id
            "#
        )
        .bind(max_age)
        .fetch_all(&mut *tx)
        .await?;

        if expired.is_empty() {
            tx.commit().await?;
            return Ok(ReleaseSummary::default());
        }

        let seats_released = sqlx::query(
            r#"
            UPDATE seats
            SET status = $1
            WHERE status = $2
              AND id IN (SELECT seat_id FROM booking_seats WHERE booking_id = ANY($3))
            "#
        )
        .bind(SeatStatus::Available.as_str())
        .bind(SeatStatus::Booked.as_str())
        .bind(&expired[..])
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        Ok(ReleaseSummary {
            bookings_expired: expired.len(),
            seats_released,
        })
    }

    /// Проверка целостности: id мест, которые числятся за несколькими
    /// активными бронями одновременно.
    pub async fn double_booked_seats(&self) -> Result<Vec<i32>, AppError> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT bs.seat_id
            FROM booking_seats bs
            JOIN bookings b ON b.id = bs.booking_id
            WHERE b.status IN ('pending', 'confirmed')
            GROUP BY bs.seat_id
            HAVING COUNT(*) > 1
            ORDER BY bs.seat_id
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
