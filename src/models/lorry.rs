use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Tracked vehicle. `owner_id` is a nullable 1:1 link to a user, set at most
/// once by the auto-claim conditional update and used only for authorization.
#[derive(Debug, Clone, FromRow)]
pub struct Lorry {
    pub id: i64,
    pub name: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
