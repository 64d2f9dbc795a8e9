pub mod config;
pub mod database;
pub mod models;
pub mod controllers;
pub mod middleware;
pub mod services;
pub mod utils;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use services::{AdminAuth, BookingLedger, ExpirySweeper, SeatInventory};
use utils::AppError;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
    pub inventory: SeatInventory,
    pub ledger: BookingLedger,
    pub admins: AdminAuth,
}

impl AppState {
    /// Подключение, миграции и начальные данные.
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::connect(&config.database).await?;
        info!("Database connected");

        db.run_migrations().await?;

        let state = Self::with_database(db, config);
        state.bootstrap().await?;
        Ok(state)
    }

    pub fn with_database(db: database::Database, config: config::Config) -> Arc<Self> {
        let inventory = SeatInventory::new(db.pool.clone());
        let ledger = BookingLedger::new(db.pool.clone(), config.features.strict_seat_availability);
        let admins = AdminAuth::new(db.clone());

        Arc::new(Self { db, config, inventory, ledger, admins })
    }

    /// Идемпотентно: администратор и места создаются только при пустых таблицах.
    pub async fn bootstrap(&self) -> Result<(), AppError> {
        self.admins.ensure_admin_account(&self.config.admin).await?;
        self.inventory.seed().await?;
        Ok(())
    }

    pub fn sweeper(&self) -> ExpirySweeper {
        ExpirySweeper::new(self.ledger.clone(), &self.config.sweeper)
    }
}

/// Полный HTTP-роутер приложения.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Venue Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .fallback(controllers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
