use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::database::Database;
use crate::models::User;
use crate::utils::AppError;

/// Проверка учётных данных администратора. Сессий и токенов нет:
/// успешная проверка ничего не выдаёт, каждый защищённый вызов
/// передаёт логин и пароль заново.
#[derive(Clone)]
pub struct AdminAuth {
    db: Database,
}

impl AdminAuth {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn verify_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        // Пустые учётные данные не совпадают ни с одной записью
        if username.is_empty() || password.is_empty() {
            return Ok(false);
        }

        let user = match User::find_by_username(username, &self.db).await? {
            Some(user) if user.is_admin => user,
            _ => return Ok(false),
        };

        // bcrypt тяжёлый по CPU, не держим на нём рабочий поток
        let password = password.to_string();
        tokio::task::spawn_blocking(move || user.verify_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password check task failed: {}", e)))
    }

    /// Создаёт администратора при первом запуске, если ни одного ещё нет.
    pub async fn ensure_admin_account(&self, admin: &AdminConfig) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE is_admin)")
            .fetch_one(&self.db.pool)
            .await?;

        if exists {
            return Ok(false);
        }

        let password = admin.password.clone();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| AppError::Internal(format!("password hash task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("password hash failed: {}", e)))?;

        let created = sqlx::query(
            "INSERT INTO users (username, password_hash, is_admin) VALUES ($1, $2, TRUE)
             ON CONFLICT (username) DO NOTHING"
        )
        .bind(&admin.username)
        .bind(&hash)
        .execute(&self.db.pool)
        .await?
        .rows_affected()
            > 0;

        if created {
            info!("👤 Admin account '{}' created", admin.username);
            if admin.uses_default_password() {
                warn!("👤 Admin account uses the default password, set ADMIN_PASSWORD before exposing the service");
            }
        }

        Ok(created)
    }
}
