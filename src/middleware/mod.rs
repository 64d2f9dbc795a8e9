use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use base64::{Engine as _, engine::general_purpose};
use std::sync::Arc;

use crate::utils::AppError;

/// Доступ к админским маршрутам.
///
/// При выключенном `ENABLE_ADMIN_AUTH` пропускает всех (`username == None`).
/// Иначе требует Basic Auth с учёткой администратора на каждом запросе.
#[derive(Debug, Clone)]
pub struct AdminGuard {
    pub username: Option<String>,
}

impl FromRequestParts<Arc<crate::AppState>> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.features.enable_admin_auth {
            return Ok(AdminGuard { username: None });
        }

        let (username, password) = basic_credentials(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Admin credentials required".to_string()))?;

        if !state.admins.verify_admin(&username, &password).await? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(AdminGuard { username: Some(username) })
    }
}

/// Разбирает `Authorization: Basic base64(username:password)`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;

    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;

    // Разделяем username:password, пароль может содержать ':'
    let (username, password) = credentials.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
