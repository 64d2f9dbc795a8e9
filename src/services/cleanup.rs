use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::config::SweeperConfig;
use crate::services::ledger::{BookingLedger, ReleaseSummary};
use crate::utils::AppError;

/// Фоновая очистка: по таймеру отменяет зависшие pending-брони.
/// Общего состояния с обработчиками нет, только БД.
#[derive(Clone)]
pub struct ExpirySweeper {
    ledger: BookingLedger,
    interval: Duration,
    expiry_window: Duration,
}

impl ExpirySweeper {
    pub fn new(ledger: BookingLedger, config: &SweeperConfig) -> Self {
        Self {
            ledger,
            interval: config.interval(),
            expiry_window: config.expiry_window(),
        }
    }

    /// Один проход очистки
    pub async fn run_once(&self) -> Result<ReleaseSummary, AppError> {
        let summary = self.ledger.release_expired_bookings(self.expiry_window).await?;

        if summary.bookings_expired == 0 {
            info!("🧹 No expired bookings to release");
        } else {
            info!(
                "🧹 Released {} expired bookings, {} seats back on sale",
                summary.bookings_expired, summary.seats_released
            );
        }

        match self.ledger.double_booked_seats().await {
            Ok(seats) if !seats.is_empty() => {
                warn!("🧹 Seats held by more than one active booking: {:?}", seats);
            }
            Ok(_) => {}
            Err(e) => error!("🧹 Double-booking check failed: {:?}", e),
        }

        Ok(summary)
    }

    /// Запускает бесконечный цикл. Первый проход через `interval` после старта.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    error!("🧹 Expired booking sweep failed: {:?}", e);
                }
            }
        })
    }
}
