use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    // Найти пользователя по имени
    pub async fn find_by_username(username: &str, db: &crate::database::Database) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, is_admin FROM users WHERE username = $1"
        )
        .bind(username)
        .fetch_optional(&db.pool)
        .await
    }

    /// Проверка пароля. Поддерживаются bcrypt-хэши и старые записи с паролем
    /// в открытом виде.
    pub fn verify_password(&self, password: &str) -> bool {
        if is_bcrypt_hash(&self.password_hash) {
            bcrypt::verify(password, &self.password_hash).unwrap_or(false)
        } else {
            self.password_hash == password
        }
    }
}

fn is_bcrypt_hash(value: &str) -> bool {
    value.len() == 60 && ["$2a$", "$2b$", "$2x$", "$2y$"].iter().any(|p| value.starts_with(p))
}
