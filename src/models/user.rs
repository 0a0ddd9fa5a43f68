use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Operator identity. `username` doubles as the auto-claim link key: an
/// unclaimed lorry whose name equals the username is claimed on first use.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
