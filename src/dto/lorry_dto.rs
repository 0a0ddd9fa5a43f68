use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::lorry::Lorry;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLorryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LorryResponse {
    pub id: i64,
    pub name: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl LorryResponse {
    pub fn from_model(lorry: &Lorry) -> Self {
        Self {
            id: lorry.id,
            name: lorry.name.clone(),
            owner_id: lorry.owner_id,
            created_at: lorry.created_at,
        }
    }
}
